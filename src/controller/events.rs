use std::str::FromStr;

use crate::domain::{ProductFields, ProductId};
use crate::error::FieldError;
use crate::view_state::SortKey;

/// Everything a user can do on the product page.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Reload,
    GoToPage(u32),
    NextPage,
    PreviousPage,
    Retry,
    Search(String),
    SelectCategory(String),
    SortBy(SortKey),
    ClearFilters,
    OpenAdd,
    OpenEdit(ProductId),
    Submit(ProductFields),
    CloseModal,
    Delete(ProductId),
    LoadCategories,
}

impl UiEvent {
    pub const HELP: &'static str = "\
commands:
  reload | page N | next | prev | retry
  search TEXT | category SLUG | sort KEY | clear
  categories
  add | edit ID | save key=value ... | cancel
  delete ID
  help | quit";
}

fn product_id(arg: &str) -> Result<ProductId, FieldError> {
    arg.parse::<ProductId>().map_err(|_| FieldError::InvalidNumber {
        field: "id".to_string(),
        value: arg.to_string(),
    })
}

fn required<'a>(arg: &'a str, name: &'static str) -> Result<&'a str, FieldError> {
    if arg.is_empty() {
        Err(FieldError::MissingArgument(name))
    } else {
        Ok(arg)
    }
}

/// Splits `title=Desk Lamp price=5` into `title=Desk Lamp` and `price=5`.
///
/// A word only starts a new pair when it opens with a known field name and
/// `=`; any other word belongs to the value before it.
fn form_pairs(rest: &str) -> Vec<String> {
    let mut pairs: Vec<String> = Vec::new();
    for word in rest.split_whitespace() {
        let starts_pair = word
            .split_once('=')
            .is_some_and(|(key, _)| ProductFields::NAMES.contains(&key));
        match pairs.last_mut() {
            Some(pair) if !starts_pair => {
                pair.push(' ');
                pair.push_str(word);
            }
            _ => pairs.push(word.to_string()),
        }
    }
    pairs
}

/// Parses one shell line, e.g. `search phone` or `save title=Lamp price=9`.
///
/// `search` and `category` accept an empty argument to drop that filter.
impl FromStr for UiEvent {
    type Err = FieldError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let event = match command {
            "reload" => UiEvent::Reload,
            "page" => {
                let page = required(rest, "page")?;
                let page = page.parse::<u32>().map_err(|_| FieldError::InvalidNumber {
                    field: "page".to_string(),
                    value: page.to_string(),
                })?;
                UiEvent::GoToPage(page)
            }
            "next" => UiEvent::NextPage,
            "prev" | "previous" => UiEvent::PreviousPage,
            "retry" => UiEvent::Retry,
            "search" => UiEvent::Search(rest.to_string()),
            "category" => UiEvent::SelectCategory(rest.to_string()),
            "sort" => UiEvent::SortBy(rest.parse()?),
            "clear" => UiEvent::ClearFilters,
            "categories" => UiEvent::LoadCategories,
            "add" => UiEvent::OpenAdd,
            "edit" => UiEvent::OpenEdit(product_id(required(rest, "edit")?)?),
            "save" => {
                let pairs = form_pairs(rest);
                UiEvent::Submit(ProductFields::from_pairs(pairs.iter().map(String::as_str))?)
            }
            "cancel" => UiEvent::CloseModal,
            "delete" => UiEvent::Delete(product_id(required(rest, "delete")?)?),
            other => return Err(FieldError::UnknownCommand(other.to_string())),
        };
        Ok(event)
    }
}
