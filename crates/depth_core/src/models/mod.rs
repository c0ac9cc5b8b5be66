pub mod depth_chart;
pub mod player;
pub mod position;
pub mod status;

pub use depth_chart::{
    build_depth_chart, build_formation, players_at, DepthChartView, FormationSlot, GroupView,
    PhaseView, PositionView, FORMATION_SLOTS,
};
pub use player::{sort_for_display, Player, PlayerId};
pub use position::{Phase, Position, PositionGroup, POSITION_GROUPS};
pub use status::{status_key, Status, StatusKeyEntry};
