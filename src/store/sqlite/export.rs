//! Whole-graph export.

use super::Transaction;
use super::rows::{parse_note_id, parse_visibility};
use crate::domain::{GraphExport, GraphLink, GraphNode, TagLink, TagNode};
use crate::store::StoreResult;

impl Transaction<'_> {
    /// Reads every note, edge, tag and membership from one snapshot.
    ///
    /// Nodes are ordered by creation, everything else by key, so repeated
    /// exports of an unchanged graph are identical.
    pub fn export_graph(&self) -> StoreResult<GraphExport> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, title, visibility FROM notes ORDER BY created_at, id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        let nodes = rows
            .into_iter()
            .map(|(id, title, visibility)| {
                Ok(GraphNode::new(
                    parse_note_id(&id)?,
                    title,
                    parse_visibility(&visibility)?,
                ))
            })
            .collect::<StoreResult<Vec<_>>>()?;

        let links = self
            .all_links()?
            .into_iter()
            .map(|(source, target)| GraphLink::new(source, target))
            .collect();

        let tags = self
            .all_tags()?
            .iter()
            .map(|tag| TagNode::new(tag.id, &tag.name))
            .collect();

        let tag_links = self
            .all_memberships()?
            .into_iter()
            .map(|(note, tag)| TagLink::new(note, tag))
            .collect();

        Ok(GraphExport {
            nodes,
            links,
            tags,
            tag_links,
        })
    }
}
