mod queue_handler;

pub use queue_handler::{
    __path_cancel_ticket, __path_get_department_status, __path_get_patient_status,
    __path_issue_ticket, cancel_ticket, get_department_status, get_patient_status, issue_ticket,
};
