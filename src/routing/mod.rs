//! 路由数据结构
//!
//! 路由、AS-PATH、每节点的路由表以及维护最优路由的选择器。

mod bgp_route;
mod path;
mod route;
mod selector;
mod table;

pub use bgp_route::BgpRoute;
pub use path::Path;
pub use route::Route;
pub use selector::RouteSelector;
pub use table::RoutingTable;
