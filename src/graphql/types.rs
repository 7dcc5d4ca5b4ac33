//! GraphQL object and input types

use async_graphql::{ID, InputObject, SimpleObject};

use crate::db::{CreateLead, LeadRecord, LeadService, UpdateLead};

use super::scalars::{EmailAddress, PhoneNumber};

/// A captured lead
#[derive(Debug, Clone, SimpleObject)]
pub struct Lead {
    pub id: ID,
    pub name: String,
    pub email: EmailAddress,
    pub mobile: PhoneNumber,
    pub postcode: String,
    pub service: LeadService,
    /// Creation time, ISO 8601 without offset (database local time)
    pub created_at: Option<String>,
}

impl From<LeadRecord> for Lead {
    fn from(r: LeadRecord) -> Self {
        Self {
            id: ID(r.id.to_string()),
            name: r.name,
            email: EmailAddress(r.email),
            mobile: PhoneNumber(r.mobile),
            postcode: r.postcode,
            service: r.service,
            created_at: r
                .created_at
                .map(|t| t.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
        }
    }
}

/// Input for registering a new lead
#[derive(Debug, Clone, InputObject)]
pub struct RegisterInput {
    pub name: String,
    pub email: EmailAddress,
    pub mobile: PhoneNumber,
    pub postcode: String,
    pub service: LeadService,
}

impl From<RegisterInput> for CreateLead {
    fn from(input: RegisterInput) -> Self {
        Self {
            name: input.name,
            email: input.email.0,
            mobile: input.mobile.0,
            postcode: input.postcode,
            service: input.service,
        }
    }
}

/// Input for updating a lead; omitted fields keep their current value
#[derive(Debug, Clone, Default, InputObject)]
pub struct UpdateLeadInput {
    pub name: Option<String>,
    pub email: Option<EmailAddress>,
    pub mobile: Option<PhoneNumber>,
    pub postcode: Option<String>,
    pub service: Option<LeadService>,
}

impl From<UpdateLeadInput> for UpdateLead {
    fn from(input: UpdateLeadInput) -> Self {
        Self {
            name: input.name,
            email: input.email.map(|e| e.0),
            mobile: input.mobile.map(|m| m.0),
            postcode: input.postcode,
            service: input.service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lead_from_record() {
        let created_at = NaiveDate::from_ymd_opt(2025, 1, 31)
            .and_then(|d| d.and_hms_micro_opt(9, 30, 15, 250_000))
            .unwrap();
        let lead = Lead::from(LeadRecord {
            id: 42,
            name: "John Doe".into(),
            email: "john@example.com".into(),
            mobile: "+1234567890".into(),
            postcode: "12345".into(),
            service: LeadService::PickUp,
            created_at: Some(created_at),
        });

        assert_eq!(lead.id, ID("42".into()));
        assert_eq!(lead.email, EmailAddress("john@example.com".into()));
        assert_eq!(lead.service, LeadService::PickUp);
        assert_eq!(lead.created_at.as_deref(), Some("2025-01-31T09:30:15.250"));
    }

    #[test]
    fn test_update_input_keeps_omitted_fields_absent() {
        let patch = UpdateLead::from(UpdateLeadInput {
            email: Some(EmailAddress("jane@example.com".into())),
            ..Default::default()
        });

        assert_eq!(patch.name, None);
        assert_eq!(patch.email.as_deref(), Some("jane@example.com"));
        assert_eq!(patch.service, None);
    }
}
