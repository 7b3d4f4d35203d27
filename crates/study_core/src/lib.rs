pub mod advice;
pub mod catalog;
pub mod domain;
pub mod ports;
pub mod spelling;
pub mod tips;

pub use advice::{advise, recommend};
pub use catalog::{Catalog, CatalogItem, CatalogKind};
pub use domain::{
    NewProgressEntry, NewReminder, NewStudyPlan, ProgressEntry, ProgressOwner, Reminder, Session,
    StudyPlan, User, UserCredentials, GUEST_NAME,
};
pub use ports::{DatabaseService, PortError, PortResult};
pub use spelling::correct_spelling;
