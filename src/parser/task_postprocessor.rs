//! Post-parse task decoration.
//!
//! Runs once after the block tree is built. A list item whose first
//! child is a paragraph starting with a task marker gets its two derived
//! class attributes filled in; nothing else in the tree changes, and
//! running the pass again recomputes identical values.

use crate::ast::{Block, Document, Inline, ListItem, TaskDecoration, TaskState};

pub(crate) fn decorate_tasks(mut document: Document) -> Document {
    for block in &mut document.children {
        decorate_block(block);
    }
    document
}

fn decorate_block(block: &mut Block) {
    match block {
        Block::List(list) => {
            for item in &mut list.items {
                if let Some(state) = item_task_state(item) {
                    let class = state.css_class();
                    log::debug!("decorating task item as {}", class);
                    item.task = Some(TaskDecoration {
                        state_class: class.to_string(),
                        item_class: format!("task-item task-item--{class}"),
                    });
                }
                for child in &mut item.children {
                    decorate_block(child);
                }
            }
        }
        Block::Callout(callout) => {
            for child in &mut callout.children {
                decorate_block(child);
            }
        }
        Block::BlockQuote(quote) => {
            for child in &mut quote.children {
                decorate_block(child);
            }
        }
        _ => {}
    }
}

fn item_task_state(item: &ListItem) -> Option<TaskState> {
    match item.children.first() {
        Some(Block::Paragraph(paragraph)) => match paragraph.content.first() {
            Some(Inline::TaskMarker(state)) => Some(*state),
            _ => None,
        },
        _ => None,
    }
}
