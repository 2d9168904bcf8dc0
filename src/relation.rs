use crate::edge::Anchor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four precedence relations selected by an edge's `(from_type, to_type)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// Finish-to-start: the successor starts after the predecessor finishes.
    FinishStart,
    /// Start-to-start.
    StartStart,
    /// Finish-to-finish.
    FinishFinish,
    /// Start-to-finish (jump dependency).
    StartFinish,
}

impl RelationKind {
    pub const ALL: [RelationKind; 4] = [
        RelationKind::FinishStart,
        RelationKind::StartStart,
        RelationKind::FinishFinish,
        RelationKind::StartFinish,
    ];

    pub fn from_anchors(from: Anchor, to: Anchor) -> Self {
        match (from, to) {
            (Anchor::Finish, Anchor::Start) => RelationKind::FinishStart,
            (Anchor::Start, Anchor::Start) => RelationKind::StartStart,
            (Anchor::Finish, Anchor::Finish) => RelationKind::FinishFinish,
            (Anchor::Start, Anchor::Finish) => RelationKind::StartFinish,
        }
    }

    pub fn anchors(self) -> (Anchor, Anchor) {
        match self {
            RelationKind::FinishStart => (Anchor::Finish, Anchor::Start),
            RelationKind::StartStart => (Anchor::Start, Anchor::Start),
            RelationKind::FinishFinish => (Anchor::Finish, Anchor::Finish),
            RelationKind::StartFinish => (Anchor::Start, Anchor::Finish),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            RelationKind::FinishStart => "FS",
            RelationKind::StartStart => "SS",
            RelationKind::FinishFinish => "FF",
            RelationKind::StartFinish => "SF",
        }
    }

    /// `from-to` anchor key, e.g. `finish-start`.
    pub fn value(self) -> &'static str {
        self.descriptor().value
    }

    pub fn descriptor(self) -> &'static RelationDescriptor {
        match self {
            RelationKind::FinishStart => &RELATION_KINDS[0],
            RelationKind::StartStart => &RELATION_KINDS[1],
            RelationKind::FinishFinish => &RELATION_KINDS[2],
            RelationKind::StartFinish => &RELATION_KINDS[3],
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for RelationKind {
    type Err = String;

    /// Accepts the two-letter code (`FS`) or the anchor key (`finish-start`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        RelationKind::ALL
            .into_iter()
            .find(|kind| {
                kind.code().eq_ignore_ascii_case(needle) || kind.value().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| format!("unknown relation kind '{needle}'"))
    }
}

/// Display entry of the relation catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationDescriptor {
    pub kind: RelationKind,
    pub value: &'static str,
    pub code: &'static str,
    pub label: &'static str,
    /// DIN 69900 term for the relation.
    pub din_name: &'static str,
    pub description: &'static str,
}

static RELATION_KINDS: [RelationDescriptor; 4] = [
    RelationDescriptor {
        kind: RelationKind::FinishStart,
        value: "finish-start",
        code: "FS",
        label: "FS - Finish to Start",
        din_name: "Normalfolge",
        description: "Task A must finish before Task B can start",
    },
    RelationDescriptor {
        kind: RelationKind::StartStart,
        value: "start-start",
        code: "SS",
        label: "SS - Start to Start",
        din_name: "Anfangsfolge",
        description: "Tasks A and B must start at the same time",
    },
    RelationDescriptor {
        kind: RelationKind::FinishFinish,
        value: "finish-finish",
        code: "FF",
        label: "FF - Finish to Finish",
        din_name: "Endfolge",
        description: "Tasks A and B must finish at the same time",
    },
    RelationDescriptor {
        kind: RelationKind::StartFinish,
        value: "start-finish",
        code: "SF",
        label: "SF - Start to Finish",
        din_name: "Sprungfolge",
        description: "Task A must start before Task B can finish",
    },
];

/// Static catalog of the supported relation kinds.
pub fn relation_kinds() -> &'static [RelationDescriptor] {
    &RELATION_KINDS
}
