mod department;
mod ticket;

pub use department::DepartmentDirectory;
pub use ticket::{
    ticket_code, IssuedTicket, NewTicket, PatientKey, QueueCounts, QueueKey, QueueSnapshot, Ticket,
};
