//! `dump` command implementation.

use anyhow::Result;
use contracts::ItemRef;
use dispatcher::{apply_iter, LogHandler};
use tracing::info;

use super::{handler_records, load_buffer};
use crate::cli::DumpArgs;
use crate::error::CliError;

/// Execute the `dump` command
///
/// The printer and the log handler are fanned out together, printer first.
/// Both see the records `handler_records` keeps, so composites are printed
/// only under `--strict`.
pub fn run_dump(args: &DumpArgs) -> Result<()> {
    info!(dataset = %args.file.display(), "Dumping records");

    let buffer = load_buffer(&args.file)?;

    let mut printer = |item: ItemRef<'_>| println!("{}", describe(item));
    let mut log = LogHandler::new("dump");

    let summary = apply_iter(
        handler_records(&buffer, args.strict),
        (&mut printer, &mut log),
    )
    .map_err(|e| CliError::traversal(args.file.display().to_string(), e))?;

    info!(
        items = summary.items,
        groups = summary.groups,
        entities = log.entities(),
        "Dump complete"
    );

    Ok(())
}

/// One-line description of a record
fn describe(item: ItemRef<'_>) -> String {
    match item {
        ItemRef::Node(node) => format!(
            "node {} v{} ({:.7}, {:.7}) tags={}",
            node.id,
            node.version,
            node.location.lon,
            node.location.lat,
            node.tags.len()
        ),
        ItemRef::Way(way) => format!(
            "way {} v{} nodes={} tags={}{}",
            way.id,
            way.version,
            way.nodes.len(),
            way.tags.len(),
            if way.nodes.is_closed() { " closed" } else { "" }
        ),
        ItemRef::Relation(relation) => format!(
            "relation {} v{} members={} tags={}",
            relation.id,
            relation.version,
            relation.members.len(),
            relation.tags.len()
        ),
        ItemRef::Changeset(changeset) => format!(
            "changeset {} user={} changes={}",
            changeset.id, changeset.user, changeset.num_changes
        ),
        ItemRef::TagList(tags) => format!("tag_list len={}", tags.len()),
        ItemRef::WayNodeList(nodes) => format!("way_node_list len={}", nodes.len()),
        ItemRef::RelationMemberList(members) => {
            format!("{} len={}", members.item_type(), members.len())
        }
    }
}
