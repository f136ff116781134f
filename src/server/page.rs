//! The single-page dashboard served at `/`.

use minijinja::Environment;
use minijinja::context;
use serde::Serialize;

use crate::model::DeliveryPref;
use crate::model::Frequency;

const TITLE: &str = "St. George Rental Market Stats";
const DESCRIPTION: &str =
    "Generate and send branded rental market analysis reports to your client list";

#[derive(Serialize)]
struct FrequencyOption {
    value: &'static str,
    label: &'static str,
}

/// Renders the dashboard once; the page is static after startup.
pub fn render_dashboard(workflow_path: &str, contacts_path: &str) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("index.html", include_str!("../../templates/index.html"))?;

    let frequencies: Vec<FrequencyOption> = [Frequency::Monthly, Frequency::Weekly]
        .iter()
        .map(|f| FrequencyOption {
            value: f.as_str(),
            label: f.label(),
        })
        .collect();
    let delivery_prefs = [DeliveryPref::Email, DeliveryPref::Sms, DeliveryPref::Both];

    let template = env.get_template("index.html")?;
    template.render(context! {
        title => TITLE,
        description => DESCRIPTION,
        frequencies => frequencies,
        delivery_prefs => delivery_prefs,
        workflow_path => workflow_path,
        contacts_path => contacts_path,
    })
}
