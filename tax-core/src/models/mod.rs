mod calculation_result;
mod profile;
mod save_request;

pub use calculation_result::{Advice, AdviceItem, CalculationResult, SavingsBreakdownItem, TaxSnapshot};
pub use profile::{
    AGE_GROUPS, DISABILITY_LEVELS, Deductions, HousePropertyIncome, HraDetails, Income,
    PersonalDetails, Profile, RESIDENT_STATUSES, SalaryIncome,
};
pub use save_request::{SaveAck, SaveProfileRequest};
