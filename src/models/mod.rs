//! Request and response models exchanged with the ConcreteGo API.

pub mod charges;
pub mod reason_codes;

pub use charges::{
    ChargesRequest, SundryChargeAction, SundryChargeRequest, SundryChargesMethod,
    SundryChargesRequest,
};
pub use reason_codes::{ReasonCodeResponse, ReasonCodeRet};
