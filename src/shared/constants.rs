/// Prefix of the printed ticket code ("A1", "A12", ...)
pub const TICKET_CODE_PREFIX: &str = "A";

/// Metadata message for successful responses
pub const MESSAGE_SUCCESS: &str = "success";

/// Advisory shown on the receipt of a card number seen for the first time
pub const MESSAGE_NEW_PATIENT: &str = "Pasien baru, harap mengambil antrean kembali.";

/// Metadata message when no ticket matches a lookup or cancellation
pub const MESSAGE_TICKET_NOT_FOUND: &str = "Antrian not found";

/// Date format of `tanggalperiksa`
pub const EXAM_DATE_FORMAT: &str = "%Y-%m-%d";
