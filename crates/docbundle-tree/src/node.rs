//! Compiled tree types.
//!
//! A [`Node`] is either a document (a markdown file) or a section (a
//! directory). Serialization matches the bundle format:
//!
//! ```json
//! {"name": "intro", "title": "Intro", "content": "# Intro\n", "url": "...", "headers": {"#": ["Intro"]}}
//! {"name": "guide", "title": "Guide", "content": [...], "url": "..."}
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

/// Heading marker (`#`, `##`, ...) to heading texts in document order.
///
/// Keys are sorted so serialized output is stable across runs.
pub type Headings = BTreeMap<String, Vec<String>>;

/// Content of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Content {
    /// Raw document text.
    Document(String),
    /// Ordered children of a section.
    Section(Vec<Node>),
}

/// A compiled documentation tree element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Entry name with the document extension stripped.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Document text or section children.
    pub content: Content,
    /// Link to the entry in the hosted repository tree.
    pub url: String,
    /// Headings by marker. Documents only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headings>,
}

impl Node {
    /// Create a document node.
    #[must_use]
    pub fn document(
        name: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        url: impl Into<String>,
        headers: Headings,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            content: Content::Document(text.into()),
            url: url.into(),
            headers: Some(headers),
        }
    }

    /// Create a section node.
    #[must_use]
    pub fn section(
        name: impl Into<String>,
        title: impl Into<String>,
        children: Vec<Node>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            content: Content::Section(children),
            url: url.into(),
            headers: None,
        }
    }

    /// True for directory nodes.
    #[must_use]
    pub fn is_section(&self) -> bool {
        matches!(self.content, Content::Section(_))
    }

    /// Children of a section; empty for documents.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match &self.content {
            Content::Section(children) => children,
            Content::Document(_) => &[],
        }
    }
}

/// Counts over a compiled tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    /// Number of document nodes.
    pub documents: usize,
    /// Number of section nodes.
    pub sections: usize,
    /// Deepest section nesting (0 when the root has no sections).
    pub depth: usize,
}

impl TreeStats {
    /// Count documents and sections in `nodes`, recursively.
    #[must_use]
    pub fn collect(nodes: &[Node]) -> Self {
        let mut stats = Self::default();
        stats.visit(nodes, 0);
        stats
    }

    fn visit(&mut self, nodes: &[Node], depth: usize) {
        for node in nodes {
            if node.is_section() {
                self.sections += 1;
                self.depth = self.depth.max(depth + 1);
                self.visit(node.children(), depth + 1);
            } else {
                self.documents += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn sample_tree() -> Vec<Node> {
        let mut headers = Headings::new();
        headers.insert("#".to_owned(), vec!["Intro".to_owned()]);
        vec![
            Node::document("intro", "Intro", "# Intro\n", "https://h/o/r/tree/main/docs/intro.md", headers),
            Node::section(
                "guide",
                "The Guide",
                vec![Node::document(
                    "setup",
                    "setup",
                    "text",
                    "https://h/o/r/tree/main/docs/guide/setup.md",
                    Headings::new(),
                )],
                "https://h/o/r/tree/main/docs/guide",
            ),
        ]
    }

    #[test]
    fn test_serialize_shape() {
        let value = serde_json::to_value(sample_tree()).unwrap();
        assert_eq!(
            value,
            json!([
                {
                    "name": "intro",
                    "title": "Intro",
                    "content": "# Intro\n",
                    "url": "https://h/o/r/tree/main/docs/intro.md",
                    "headers": {"#": ["Intro"]}
                },
                {
                    "name": "guide",
                    "title": "The Guide",
                    "content": [{
                        "name": "setup",
                        "title": "setup",
                        "content": "text",
                        "url": "https://h/o/r/tree/main/docs/guide/setup.md",
                        "headers": {}
                    }],
                    "url": "https://h/o/r/tree/main/docs/guide"
                }
            ])
        );
    }

    #[test]
    fn test_serialize_field_order() {
        let json = serde_json::to_string(&sample_tree()[1]).unwrap();
        let name = json.find("\"name\"").unwrap();
        let title = json.find("\"title\"").unwrap();
        let content = json.find("\"content\"").unwrap();
        let url = json.rfind("\"url\"").unwrap();
        assert!(name < title && title < content && content < url);
        assert!(!json.contains("\"headers\":null"));
    }

    #[test]
    fn test_children() {
        let tree = sample_tree();
        assert!(tree[0].children().is_empty());
        assert!(!tree[0].is_section());
        assert_eq!(tree[1].children().len(), 1);
        assert!(tree[1].is_section());
    }

    #[test]
    fn test_stats() {
        let stats = TreeStats::collect(&sample_tree());
        assert_eq!(
            stats,
            TreeStats {
                documents: 2,
                sections: 1,
                depth: 1,
            }
        );
        assert_eq!(TreeStats::collect(&[]), TreeStats::default());
    }
}
