pub mod rest;

pub use rest::{EndpointSource, FixedEndpoint, JobStoreClient, JobStoreError};
