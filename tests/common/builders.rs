//! Test data builders for command parameters and entities.

use internsprint::commands::Parameters;
use internsprint::models::{Internship, InternshipDetails};

/// Build command parameters from literal pairs.
pub fn params(pairs: &[(&str, &str)]) -> Parameters {
    Parameters::from_pairs(pairs.iter().copied()).expect("Test parameters should be unique")
}

/// Builder for creating test internships.
pub struct InternshipBuilder {
    company: String,
    role: String,
    details: InternshipDetails,
    status: Option<String>,
}

impl InternshipBuilder {
    pub fn software(company: impl Into<String>) -> Self {
        Self::new(company, InternshipDetails::Software { tech_stack: None })
    }

    pub fn hardware(company: impl Into<String>) -> Self {
        Self::new(
            company,
            InternshipDetails::Hardware {
                embedded_systems: None,
            },
        )
    }

    pub fn general(company: impl Into<String>) -> Self {
        Self::new(company, InternshipDetails::General { department: None })
    }

    fn new(company: impl Into<String>, details: InternshipDetails) -> Self {
        Self {
            company: company.into(),
            role: "Intern".to_string(),
            details,
            status: None,
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn build(self) -> Internship {
        let mut internship = Internship::new(&self.company, &self.role, self.details);
        if let Some(status) = self.status {
            internship.status = status;
        }
        internship
    }
}
