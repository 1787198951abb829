//! Dispatch a parsed command to the matching record facade.

use anyhow::Context;
use carehub_app::ports::{ClientFactory, Notifier};
use carehub_app::services::{
    AppointmentService, BedService, PatientService, RecordService, WardService,
};
use carehub_domain::table::Table;
use serde_json::{Value, json};

use crate::cli::{Action, TableCommand};

/// Run `command` and return its JSON result.
///
/// # Errors
///
/// Returns an error when the record JSON given on the command line cannot be
/// read as an input for the table. Backend failures never surface here: they
/// are logged and notified by the facade, which yields its neutral value.
pub async fn run<F, N>(command: TableCommand, factory: F, notifier: N) -> anyhow::Result<Value>
where
    F: ClientFactory,
    N: Notifier,
{
    match command {
        TableCommand::Appointments { action } => {
            execute(&AppointmentService::new(factory, notifier), action).await
        }
        TableCommand::Beds { action } => execute(&BedService::new(factory, notifier), action).await,
        TableCommand::Patients { action } => {
            execute(&PatientService::new(factory, notifier), action).await
        }
        TableCommand::Wards { action } => {
            execute(&WardService::new(factory, notifier), action).await
        }
    }
}

async fn execute<T, F, N>(service: &RecordService<T, F, N>, action: Action) -> anyhow::Result<Value>
where
    T: Table,
    F: ClientFactory,
    N: Notifier,
{
    let value = match action {
        Action::List => serde_json::to_value(service.list().await)?,
        Action::Get { id } => serde_json::to_value(service.get_by_id(id.as_str()).await)?,
        Action::Create { json } => {
            let input = parse_input::<T>(&json)?;
            serde_json::to_value(service.create(&input).await)?
        }
        Action::Update { id, json } => {
            let input = parse_input::<T>(&json)?;
            serde_json::to_value(service.update(id.as_str(), &input).await)?
        }
        Action::Delete { id } => json!({ "deleted": service.delete(id.as_str()).await }),
    };
    Ok(value)
}

fn parse_input<T: Table>(json: &str) -> anyhow::Result<T::Input> {
    serde_json::from_str(json).with_context(|| format!("invalid {} JSON", T::SINGULAR))
}
