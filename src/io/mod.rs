//! Graph files in and out: the edge-list loader, the matrix printer, and the
//! random graph generator.

pub mod generate;
pub mod loader;
pub mod printer;

pub use generate::{generate_edges, generate_graph, graph_file_name};
pub use loader::{load_graph, parse_graph};
pub use printer::{write_distance_matrix, write_graph};
