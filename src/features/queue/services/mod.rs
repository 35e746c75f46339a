mod queue_service;

pub use queue_service::QueueService;
