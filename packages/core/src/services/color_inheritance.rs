//! Color inheritance from quote and toggle containers
//!
//! A single-level rewrite: children whose kind supports a color and that have
//! no color (or the `"default"` sentinel) take the parent's color. Explicit
//! child colors win. Grandchildren are not visited; nested quotes and toggles
//! re-apply the rule at their own level when their coordinator runs.

use crate::behaviors;
use crate::models::{Node, DEFAULT_COLOR};

/// Apply `parent_color` to the immediate children that lack their own
///
/// An absent or `"default"` parent color returns the input untouched.
pub fn apply_color_inheritance(mut children: Vec<Node>, parent_color: Option<&str>) -> Vec<Node> {
    let Some(parent_color) = parent_color.filter(|color| *color != DEFAULT_COLOR) else {
        return children;
    };

    for child in children.iter_mut() {
        if !behaviors::behavior(child.kind()).supports_color {
            continue;
        }
        let inherits = child.color().map_or(true, |color| color == DEFAULT_COLOR);
        if inherits {
            child.properties.set_color(parent_color);
        }
    }

    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockProperties, EmptyProperties, TextProperties};

    fn paragraph(id: &str, color: Option<&str>) -> Node {
        Node::new(
            id,
            BlockProperties::Paragraph(TextProperties {
                rich_text: Vec::new(),
                color: color.map(str::to_string),
            }),
        )
    }

    #[test]
    fn test_missing_and_default_colors_inherit() {
        let children = vec![
            paragraph("a", None),
            paragraph("b", Some("default")),
            paragraph("c", Some("red")),
        ];

        let result = apply_color_inheritance(children, Some("blue"));
        let colors: Vec<Option<&str>> = result.iter().map(Node::color).collect();
        assert_eq!(colors, vec![Some("blue"), Some("blue"), Some("red")]);
    }

    #[test]
    fn test_colorless_kinds_pass_through() {
        let divider = Node::new("d", BlockProperties::Divider(EmptyProperties {}));
        let result = apply_color_inheritance(vec![divider.clone()], Some("green"));
        assert_eq!(result, vec![divider]);
    }

    #[test]
    fn test_absent_parent_color_is_a_no_op() {
        let children = vec![paragraph("a", None)];
        assert_eq!(apply_color_inheritance(children.clone(), None), children);
        assert_eq!(
            apply_color_inheritance(children.clone(), Some(DEFAULT_COLOR)),
            children
        );
    }

    #[test]
    fn test_grandchildren_untouched() {
        let parent = paragraph("p", None).with_children(vec![paragraph("g", None)]);
        let result = apply_color_inheritance(vec![parent], Some("yellow"));

        assert_eq!(result[0].color(), Some("yellow"));
        assert_eq!(result[0].children()[0].color(), None);
    }
}
