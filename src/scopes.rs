//! Just enough of the HTML tree construction rules to pair end tags with start tags without
//! building a tree.
//!
//! Element names are expected to be lowercase, which is what the tokenizer produces.

/// Elements that never have content and therefore never see an end tag.
pub(crate) fn is_void(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

pub(crate) fn default_scope(name: &str) -> bool {
    matches!(
        name,
        "applet" | "caption" | "html" | "table" | "td" | "th" | "marquee" | "object" | "template"
    )
}

pub(crate) fn list_item_scope(name: &str) -> bool {
    default_scope(name) || matches!(name, "ol" | "ul")
}

pub(crate) fn button_scope(name: &str) -> bool {
    default_scope(name) || name == "button"
}

/// Start tags that close an open `p` element in button scope.
fn closes_paragraph(name: &str) -> bool {
    matches!(
        name,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "center"
            | "details"
            | "dialog"
            | "dir"
            | "div"
            | "dl"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hgroup"
            | "hr"
            | "li"
            | "main"
            | "menu"
            | "nav"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "summary"
            | "table"
            | "ul"
    )
}

/// An element implicitly closed by a start tag, together with the scope the search for it is
/// confined to.
#[derive(Clone, Copy)]
pub(crate) struct ImpliedEnd {
    pub name: &'static str,
    pub scope: fn(&str) -> bool,
}

/// The elements whose end tags may be omitted before a start tag of `name`, in the order they
/// must be closed.
pub(crate) fn implied_ends(name: &str) -> impl Iterator<Item = ImpliedEnd> {
    let paragraph = closes_paragraph(name).then_some(ImpliedEnd {
        name: "p",
        scope: button_scope,
    });
    let list_item = (name == "li").then_some(ImpliedEnd {
        name: "li",
        scope: list_item_scope,
    });
    list_item.into_iter().chain(paragraph)
}
