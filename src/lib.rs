pub mod engine;
pub mod error;
pub mod net;
pub mod notify;
pub mod proto;
pub mod routing;
pub mod sim;
pub mod topo;

#[cfg(test)]
mod test;
