//! Config validation
//!
//! Rules:
//! - transport name is non-empty
//! - every address (from / to / cc / bcc / recipients / reject) is non-empty
//! - `recipients` is only allowed in batch mode
//! - file transport `base_path`, when given, is non-empty

use contracts::{AddressMap, ContractError, DispatchJob, DispatchMode, TransportType};

/// Validate a DispatchJob
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(job: &DispatchJob) -> Result<(), ContractError> {
    validate_transport(job)?;
    validate_message_addresses(job)?;
    validate_recipients(job)?;
    Ok(())
}

/// Validate transport config
fn validate_transport(job: &DispatchJob) -> Result<(), ContractError> {
    let transport = &job.transport;
    if transport.name.trim().is_empty() {
        return Err(ContractError::config_validation(
            "transport.name",
            "transport name cannot be empty",
        ));
    }

    for (idx, address) in transport.reject.iter().enumerate() {
        if address.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("transport.reject[{idx}]"),
                "address cannot be empty",
            ));
        }
    }

    if transport.transport_type == TransportType::File {
        if let Some(path) = transport.params.get("base_path") {
            if path.trim().is_empty() {
                return Err(ContractError::config_validation(
                    "transport.params.base_path",
                    "base_path cannot be empty",
                ));
            }
        }
    }
    Ok(())
}

/// Validate message address lists
fn validate_message_addresses(job: &DispatchJob) -> Result<(), ContractError> {
    let message = &job.message;
    validate_address_list("message.from", &message.from)?;
    validate_address_list("message.to", &message.to)?;
    validate_address_list("message.cc", &message.cc)?;
    validate_address_list("message.bcc", &message.bcc)?;
    Ok(())
}

/// Validate streamed recipients
fn validate_recipients(job: &DispatchJob) -> Result<(), ContractError> {
    let Some(recipients) = &job.recipients else {
        return Ok(());
    };

    if job.mode != DispatchMode::Batch {
        return Err(ContractError::config_validation(
            "recipients",
            format!("recipients requires mode = \"batch\", got \"{}\"", job.mode),
        ));
    }
    validate_address_list("recipients", recipients)
}

fn validate_address_list(field: &str, list: &AddressMap) -> Result<(), ContractError> {
    for (idx, (address, _)) in list.iter().enumerate() {
        if address.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("{field}[{idx}]"),
                "address cannot be empty",
            ));
        }
    }
    Ok(())
}
