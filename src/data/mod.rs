pub mod attributes;
pub mod centroids;
pub mod demo;
pub mod geojson;
pub mod loader;
