//! Turning resolved inputs into a [`SourceSelection`].

use crate::client::{App, AppClient, AppFilter, find_app};
use crate::error::Result;
use crate::inputs::{Prompter, ResolvedInputs};

use super::spec::{FromType, SourceSelection};

/// Pick the content source for `inputs`.
///
/// Apps are looked up remotely; zero matches is [`crate::Error::AppNotFound`]
/// and several matches are settled by the prompter.
pub fn select_source(
    inputs: &ResolvedInputs,
    client: &dyn AppClient,
    prompter: &mut dyn Prompter,
) -> Result<SourceSelection> {
    let selection = match inputs.from_type {
        None => SourceSelection::Scaffold,
        Some(FromType::App) => {
            let filter = AppFilter::new(&inputs.project, &inputs.from);
            let app = find_app(client, &filter, prompter)?;
            SourceSelection::ExistingApp {
                group_id: app.group_id,
                app_id: app.id,
            }
        }
        Some(FromType::Template) => SourceSelection::Template {
            template_id: inputs.from.clone(),
        },
    };

    tracing::debug!(source = selection.kind(), "selected source");
    Ok(selection)
}

/// Look up an app, tolerating a selector that matches nothing.
///
/// `Ok(None)` means only the group (`filter.group_id`) is known and the
/// caller should fall back to it. Every other failure propagates.
pub fn resolve_app_or_group(
    client: &dyn AppClient,
    filter: &AppFilter,
    prompter: &mut dyn Prompter,
) -> Result<Option<App>> {
    match find_app(client, filter, prompter) {
        Ok(app) => Ok(Some(app)),
        Err(err) if err.is_app_not_found() => {
            tracing::debug!(group = %filter.group_id, app = %filter.app, "no app matched, falling back to group");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
