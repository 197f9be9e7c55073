use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const ARG_ID: &str = "id";
pub const ARG_QUERY: &str = "query";
pub const ARG_IMAGE: &str = "image";
pub const ARG_GARAGE: &str = "garage";
pub const ARG_FILTER: &str = "filter";

/// Text fields of the listing form: (argument id, help).
pub const FORM_FIELDS: [(&str, &str); 15] = [
    ("title", "Listing title"),
    ("price", "Asking price or rent"),
    ("city", "City"),
    ("type", "Listing type, e.g. \"For Sale\""),
    ("address", "Street address"),
    ("description", "Free-form description"),
    ("bedroom", "Number of bedrooms"),
    ("bathroom", "Number of bathrooms"),
    ("size", "Built size"),
    ("area", "Plot area"),
    ("year", "Year built"),
    ("zip-code", "Postal code"),
    ("city-area", "Neighbourhood"),
    ("state", "State or region"),
    ("country", "Country"),
];

/// Listing form values as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormOptions {
    pub fields: Vec<(String, String)>,
    pub garage: Option<u32>,
    pub image: Option<PathBuf>,
}

impl FormOptions {
    /// Parse form arguments from matches.
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        let fields = FORM_FIELDS
            .iter()
            .filter_map(|(name, _)| {
                matches
                    .get_one::<String>(name)
                    .map(|value| ((*name).to_string(), value.clone()))
            })
            .collect();

        Self {
            fields,
            garage: matches.get_one::<u32>(ARG_GARAGE).copied(),
            image: matches.get_one::<String>(ARG_IMAGE).map(PathBuf::from),
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

fn with_form_args(command: Command) -> Command {
    let command = FORM_FIELDS.iter().fold(command, |command, (name, help)| {
        command.arg(Arg::new(*name).long(*name).help(*help))
    });

    command
        .arg(
            Arg::new(ARG_GARAGE)
                .long(ARG_GARAGE)
                .help("Number of garage spaces (create defaults to 0)")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new(ARG_IMAGE)
                .long(ARG_IMAGE)
                .help("Path to the listing image"),
        )
}

fn id_arg() -> Arg {
    Arg::new(ARG_ID).help("Property id").required(true)
}

#[must_use]
pub fn with_subcommand(command: Command) -> Command {
    command.subcommand(
        Command::new("properties")
            .about("Manage property listings")
            .subcommand_required(true)
            .subcommand(
                Command::new("list").about("List every property").arg(
                    Arg::new(ARG_FILTER)
                        .long(ARG_FILTER)
                        .help("Only show listings whose title, city, type, address or description contains this text"),
                ),
            )
            .subcommand(Command::new("get").about("Show one property").arg(id_arg()))
            .subcommand(with_form_args(
                Command::new("create").about("Create a property from form fields and an image"),
            ))
            .subcommand(with_form_args(
                Command::new("update")
                    .about("Update the given fields of a property")
                    .arg(id_arg()),
            ))
            .subcommand(Command::new("delete").about("Delete a property").arg(id_arg()))
            .subcommand(
                Command::new("search").about("Search properties").arg(
                    Arg::new(ARG_QUERY)
                        .help("Search text")
                        .required(true),
                ),
            )
            .subcommand(
                Command::new("interested")
                    .about("Register interest in a property")
                    .arg(id_arg()),
            ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_of(args: Vec<&str>) -> ArgMatches {
        let matches = with_subcommand(Command::new("t")).get_matches_from(args);
        let (_, properties) = matches.subcommand().unwrap();
        let (_, leaf) = properties.subcommand().unwrap();
        leaf.clone()
    }

    #[test]
    fn create_collects_given_fields_only() {
        let leaf = leaf_of(vec![
            "t",
            "properties",
            "create",
            "--title",
            "Loft",
            "--type",
            "For Sale",
            "--zip-code",
            "1000-001",
            "--image",
            "/tmp/front.jpg",
        ]);
        let form = FormOptions::parse(&leaf);

        assert_eq!(form.field("title"), Some("Loft"));
        assert_eq!(form.field("type"), Some("For Sale"));
        assert_eq!(form.field("zip-code"), Some("1000-001"));
        assert_eq!(form.field("price"), None);
        assert_eq!(form.garage, None);
        assert_eq!(form.image, Some(PathBuf::from("/tmp/front.jpg")));
    }

    #[test]
    fn update_takes_id_and_garage() {
        let leaf = leaf_of(vec!["t", "properties", "update", "7", "--garage", "2"]);
        assert_eq!(leaf.get_one::<String>(ARG_ID).cloned(), Some("7".to_string()));

        let form = FormOptions::parse(&leaf);
        assert_eq!(form.garage, Some(2));
        assert!(form.fields.is_empty());
        assert_eq!(form.image, None);
    }

    #[test]
    fn update_without_garage_leaves_it_unset() {
        let leaf = leaf_of(vec!["t", "properties", "update", "7", "--title", "New"]);
        let form = FormOptions::parse(&leaf);
        assert_eq!(form.garage, None);
        assert_eq!(form.fields, vec![("title".to_string(), "New".to_string())]);
    }

    #[test]
    fn list_takes_optional_filter() {
        let leaf = leaf_of(vec!["t", "properties", "list", "--filter", "loft"]);
        assert_eq!(leaf.get_one::<String>(ARG_FILTER).cloned(), Some("loft".to_string()));

        let leaf = leaf_of(vec!["t", "properties", "list"]);
        assert_eq!(leaf.get_one::<String>(ARG_FILTER), None);
    }

    #[test]
    fn get_requires_id() {
        let result =
            with_subcommand(Command::new("t")).try_get_matches_from(vec!["t", "properties", "get"]);
        assert!(result.is_err());
    }
}
