use std::collections::HashSet;

use crate::config::EngineOptions;

use super::super::arena::Slot;
use super::super::model::{EdgeArena, EdgeKind};

pub(super) fn reachable_from(
    edges: &EdgeArena,
    focus: Slot,
    options: &EngineOptions,
) -> HashSet<Slot> {
    let mut reachable = HashSet::from([focus]);

    if !options.disable_person_lines {
        for (_, edge) in edges.iter_live() {
            if edge.kind() != EdgeKind::Relationship || edge.suppressed {
                continue;
            }
            if let Some(other) = edge.other_end(focus) {
                reachable.insert(other);
            }
        }
    }

    if options.show_groups {
        let groups = edges
            .iter_live()
            .filter(|(_, edge)| edge.kind() == EdgeKind::Membership && edge.to == focus)
            .map(|(_, edge)| edge.from)
            .collect::<HashSet<_>>();

        for (_, edge) in edges.iter_live() {
            if edge.kind() == EdgeKind::Membership && groups.contains(&edge.from) {
                reachable.insert(edge.to);
            }
        }
        reachable.extend(groups);
    }

    reachable
}
