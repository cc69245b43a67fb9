pub mod oracle;
pub mod route_search;
pub mod wall_follower;
pub mod waterfall;

pub use oracle::OraclePlanner;
pub use route_search::RouteSearchPlanner;
pub use wall_follower::WallFollowerPlanner;
pub use waterfall::WaterfallPlanner;
