pub mod enrich;
pub mod graph;
pub mod load;
pub mod verify;
