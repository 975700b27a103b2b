//! Read models for graph export and backlinks.

use crate::domain::{NoteId, TagId, Visibility};
use serde::Serialize;

/// A note as a graph node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: NoteId,
    pub title: String,
    /// The note's visibility, used by renderers to colour nodes.
    pub group: Visibility,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl GraphNode {
    pub fn new(id: NoteId, title: impl Into<String>, group: Visibility) -> Self {
        Self {
            id,
            title: title.into(),
            group,
            kind: "note",
        }
    }
}

/// A wikilink edge between two notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphLink {
    pub source: NoteId,
    pub target: NoteId,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl GraphLink {
    pub fn new(source: NoteId, target: NoteId) -> Self {
        Self {
            source,
            target,
            kind: "note-link",
        }
    }
}

/// A tag as an auxiliary graph node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagNode {
    /// `tag-<id>`, kept distinct from note ids.
    pub id: String,
    /// `#<name>`.
    pub title: String,
    pub group: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl TagNode {
    pub fn new(id: TagId, name: &str) -> Self {
        Self {
            id: tag_node_id(id),
            title: format!("#{name}"),
            group: "tag",
            kind: "tag",
        }
    }
}

/// Membership of a note in a tag, as an auxiliary edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagLink {
    pub source: NoteId,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl TagLink {
    pub fn new(note: NoteId, tag: TagId) -> Self {
        Self {
            source: note,
            target: tag_node_id(tag),
            kind: "tag-link",
        }
    }
}

fn tag_node_id(id: TagId) -> String {
    format!("tag-{id}")
}

/// The whole knowledge graph as four separate collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphExport {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
    pub tags: Vec<TagNode>,
    #[serde(rename = "tagLinks")]
    pub tag_links: Vec<TagLink>,
}

/// A note linking to the queried note, with the text around the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Backlink {
    pub source_id: NoteId,
    pub source_title: String,
    /// Empty when the source text no longer mentions the target's title.
    pub snippet: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn id(s: &str) -> NoteId {
        s.parse().unwrap()
    }

    #[test]
    fn export_serializes_four_collections() {
        let a = id("01HQ3K5M7NXJK4QZPW8V2R6T9Y");
        let b = id("01HQ3K5M7NXJK4QZPW8V2R6T9Z");
        let export = GraphExport {
            nodes: vec![GraphNode::new(a.clone(), "A", Visibility::Public)],
            links: vec![GraphLink::new(a.clone(), b)],
            tags: vec![TagNode::new(TagId(4), "urgent")],
            tag_links: vec![TagLink::new(a, TagId(4))],
        };

        let value = serde_json::to_value(&export).unwrap();
        assert_eq!(
            value,
            json!({
                "nodes": [{"id": "01HQ3K5M7NXJK4QZPW8V2R6T9Y", "title": "A", "group": "public", "type": "note"}],
                "links": [{"source": "01HQ3K5M7NXJK4QZPW8V2R6T9Y", "target": "01HQ3K5M7NXJK4QZPW8V2R6T9Z", "type": "note-link"}],
                "tags": [{"id": "tag-4", "title": "#urgent", "group": "tag", "type": "tag"}],
                "tagLinks": [{"source": "01HQ3K5M7NXJK4QZPW8V2R6T9Y", "target": "tag-4", "type": "tag-link"}],
            })
        );
    }

    #[test]
    fn backlink_uses_snake_case_fields() {
        let backlink = Backlink {
            source_id: id("01HQ3K5M7NXJK4QZPW8V2R6T9Y"),
            source_title: "A".to_string(),
            snippet: String::new(),
        };
        let value = serde_json::to_value(&backlink).unwrap();
        assert!(value.get("source_id").is_some());
        assert!(value.get("source_title").is_some());
        assert_eq!(value["snippet"], "");
    }
}
