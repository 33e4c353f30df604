//! Controllers behind each billing view
//!
//! A controller owns its form input and a [`Status`]. Inputs are validated
//! before anything is sent; destructive actions need two activations.

pub mod bills;
pub mod status;
pub mod student_bills;

pub use bills::{AddBill, DeleteBill, UpdateBill, ViewBills};
pub use status::{Activation, Phase, Status};
pub use student_bills::{AssignBill, AssignTarget, DeleteStudentBill, DeleteStudentBills, StudentBills};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use common::{
        config::ClientConfig, gateway::Gateway, navigation::NavigationBus,
        storage::MemoryTokenStore,
    };

    /// Gateway pointed at a port nothing listens on
    pub fn offline_gateway() -> Arc<Gateway> {
        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..ClientConfig::default()
        };
        Arc::new(
            Gateway::new(
                &config,
                Arc::new(MemoryTokenStore::new()),
                Arc::new(NavigationBus::default()),
            )
            .expect("valid gateway"),
        )
    }
}
