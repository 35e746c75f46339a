mod queue_dto;

pub use queue_dto::{
    DepartmentQueueParams, DepartmentQueueStatusDto, IssueTicketDto, PatientQueueStatusDto,
    PatientTicketDto, TicketReceiptDto,
};
