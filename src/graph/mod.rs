//! Graph representation and conversion into an association matrix

pub mod builder;
pub mod compressed;

pub use builder::GraphBuilder;
pub use compressed::UndirectedGraph;
