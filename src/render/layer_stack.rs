use serde::{Deserialize, Serialize};

/// Horizontal rows of the timeline, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneKind {
    Unavailability,
    Schedule,
}

impl LaneKind {
    pub const ORDER: [Self; 2] = [Self::Unavailability, Self::Schedule];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unavailability => "Unavailable",
            Self::Schedule => "Print Queue",
        }
    }

    /// Roles drawn in this lane, bottom-most first.
    #[must_use]
    pub const fn roles(self) -> &'static [LaneRole] {
        match self {
            Self::Unavailability => &[LaneRole::Unavailability],
            Self::Schedule => &[
                LaneRole::History,
                LaneRole::UnknownPrint,
                LaneRole::Scheduled,
            ],
        }
    }
}

/// Entity categories in ascending stacking priority.
///
/// Within the schedule lane, later roles paint over earlier ones where their
/// time ranges collide: an unknown print sits above history and queued work
/// sits above both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LaneRole {
    Unavailability,
    History,
    UnknownPrint,
    Scheduled,
}

impl LaneRole {
    #[must_use]
    pub const fn lane(self) -> LaneKind {
        match self {
            Self::Unavailability => LaneKind::Unavailability,
            Self::History | Self::UnknownPrint | Self::Scheduled => LaneKind::Schedule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LaneKind, LaneRole};

    #[test]
    fn schedule_lane_stacks_history_then_unknown_then_scheduled() {
        assert_eq!(
            LaneKind::Schedule.roles(),
            &[
                LaneRole::History,
                LaneRole::UnknownPrint,
                LaneRole::Scheduled
            ]
        );
        assert!(LaneRole::History < LaneRole::UnknownPrint);
        assert!(LaneRole::UnknownPrint < LaneRole::Scheduled);
    }

    #[test]
    fn every_role_belongs_to_the_lane_that_lists_it() {
        for lane in LaneKind::ORDER {
            for role in lane.roles() {
                assert_eq!(role.lane(), lane);
            }
        }
    }
}
