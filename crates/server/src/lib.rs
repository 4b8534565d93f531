pub mod deployment;
pub mod error;
pub mod http;
pub mod middleware;
pub mod outbox;
pub mod routes;

pub type DeploymentImpl = deployment::Deployment;
