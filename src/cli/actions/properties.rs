use crate::{
    AdminClient,
    cli::{
        actions::output::{failure, print_json},
        commands::properties::FormOptions,
    },
    config::AppConfig,
    properties::{PropertyFilter, PropertyForm, image_part},
};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
pub enum Command {
    List(PropertyFilter),
    Get(String),
    Create(FormOptions),
    Update { id: String, form: FormOptions },
    Delete(String),
    Search(String),
    Interested(String),
}

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub command: Command,
}

/// Execute a listing action.
/// # Errors
/// Returns an error if the client cannot be built, the image cannot be read,
/// or the backend call fails.
pub async fn execute(args: Args) -> Result<()> {
    let client = AdminClient::from_config(&args.config)?;
    let properties = &client.properties;

    match args.command {
        Command::List(filter) => {
            print_json(&filter.apply(properties.list().await.map_err(failure)?))
        }
        Command::Get(id) => print_json(&properties.get(&id).await.map_err(failure)?),
        Command::Create(options) => {
            let form = build_form(&options).await?;
            print_json(&properties.create(&form).await.map_err(failure)?)
        }
        Command::Update { id, form } => {
            let form = build_form(&form).await?;
            print_json(&properties.update(&id, &form).await.map_err(failure)?)
        }
        Command::Delete(id) => print_json(&properties.delete(&id).await.map_err(failure)?),
        Command::Search(query) => print_json(&properties.search(&query).await.map_err(failure)?),
        Command::Interested(id) => {
            print_json(&properties.mark_interested(&id).await.map_err(failure)?)
        }
    }
}

/// Builds the listing form, reading the image file when one was given.
async fn build_form(options: &FormOptions) -> Result<PropertyForm> {
    let mut form = form_fields(options);

    if let Some(path) = &options.image {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read image {}", path.display()))?;
        debug!(bytes = bytes.len(), "read listing image");
        form.image = Some(image_part(&file_name(path), bytes));
    }

    Ok(form)
}

fn form_fields(options: &FormOptions) -> PropertyForm {
    let text = |name: &str| options.field(name).unwrap_or_default().to_string();

    PropertyForm {
        title: text("title"),
        price: text("price"),
        city: text("city"),
        listing_type: text("type"),
        address: text("address"),
        description: text("description"),
        bedroom: text("bedroom"),
        bathroom: text("bathroom"),
        size: text("size"),
        area: text("area"),
        year: text("year"),
        zip_code: text("zip-code"),
        city_area: text("city-area"),
        state: text("state"),
        country: text("country"),
        garage: options.garage,
        image: None,
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| "image".to_string(), |name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn options(fields: &[(&str, &str)]) -> FormOptions {
        FormOptions {
            fields: fields
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect(),
            garage: Some(1),
            image: None,
        }
    }

    #[test]
    fn form_maps_cli_names_to_fields() {
        let form = form_fields(&options(&[
            ("title", "Loft"),
            ("type", "For Rent"),
            ("zip-code", "1000"),
            ("city-area", "Baixa"),
        ]));

        assert_eq!(form.title, "Loft");
        assert_eq!(form.listing_type, "For Rent");
        assert_eq!(form.zip_code, "1000");
        assert_eq!(form.city_area, "Baixa");
        assert_eq!(form.price, "");
        assert_eq!(form.garage, Some(1));
    }

    #[tokio::test]
    async fn build_form_reads_image() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(&[137, 80, 78, 71]).unwrap();

        let mut given = options(&[("title", "Loft")]);
        given.image = Some(file.path().to_path_buf());
        let form = build_form(&given).await.unwrap();

        let image = form.image.unwrap();
        assert_eq!(image.bytes, vec![137, 80, 78, 71]);
        assert_eq!(image.mime.as_deref(), Some("image/png"));
        assert!(image.file_name.ends_with(".png"));
    }

    #[tokio::test]
    async fn build_form_reports_missing_image() {
        let mut given = options(&[]);
        given.image = Some("/nonexistent/estate-admin/front.jpg".into());
        let err = build_form(&given).await.unwrap_err();
        assert!(err.to_string().contains("failed to read image"));
    }
}
