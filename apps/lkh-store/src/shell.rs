//! # Cart Shell
//!
//! Line-oriented front end over the session commands.
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products                     list the catalog                          │
//! │  search <term> [in:<cond>]    name search, optional condition filter    │
//! │  qty <id>                     units of one product in the cart          │
//! │  add <id>                     one more unit                             │
//! │  dec <id>                     one less unit (drops the line at zero)    │
//! │  rm <id>                      drop the line                             │
//! │  cart                         show lines and totals                     │
//! │  clear                        empty the cart                            │
//! │  help                         this list                                 │
//! │  quit                         leave                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use lkh_session::commands::{self, CartResponse, ProductDto};
use lkh_session::{ApiError, Session};

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Products,
    Search { term: String, condition: String },
    Quantity(String),
    Add(String),
    Decrease(String),
    Remove(String),
    Cart,
    Clear,
    Help,
    Quit,
}

/// Parses one line of input.
///
/// ## Returns
/// `Ok(None)` for a blank line, `Err` with a usage hint otherwise.
pub fn parse_line(line: &str) -> Result<Option<Input>, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };

    let input = match command.to_ascii_lowercase().as_str() {
        "products" | "ls" => Input::Products,
        "search" | "find" => {
            let mut term = Vec::new();
            let mut condition = String::new();
            for word in words {
                match word.strip_prefix("in:") {
                    Some(c) => condition = c.to_string(),
                    None => term.push(word),
                }
            }
            Input::Search {
                term: term.join(" "),
                condition,
            }
        }
        "qty" => Input::Quantity(product_arg(command, words.next())?),
        "add" | "+" => Input::Add(product_arg(command, words.next())?),
        "dec" | "-" => Input::Decrease(product_arg(command, words.next())?),
        "rm" | "remove" => Input::Remove(product_arg(command, words.next())?),
        "cart" | "show" => Input::Cart,
        "clear" => Input::Clear,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };

    Ok(Some(input))
}

fn product_arg(command: &str, arg: Option<&str>) -> Result<String, String> {
    arg.map(str::to_string)
        .ok_or_else(|| format!("usage: {} <product id>", command))
}

/// Result of running one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Products(Vec<ProductDto>),
    Quantity { product_id: String, quantity: u32 },
    Cart(CartResponse),
    Help,
    Quit,
}

/// Runs a parsed input against the session.
pub fn execute(session: &Session, input: Input) -> Result<Output, ApiError> {
    let Session { catalog, cart, .. } = session;

    let output = match input {
        Input::Products => Output::Products(commands::list_products(cart, catalog)?),
        Input::Search { term, condition } => {
            Output::Products(commands::search_products(cart, catalog, &term, &condition)?)
        }
        Input::Quantity(id) => {
            let quantity = commands::get_item_quantity(cart, &id)?;
            Output::Quantity {
                product_id: id,
                quantity,
            }
        }
        Input::Add(id) => Output::Cart(commands::increase_item(cart, catalog, &id)?),
        Input::Decrease(id) => Output::Cart(commands::decrease_item(cart, catalog, &id)?),
        Input::Remove(id) => Output::Cart(commands::remove_item(cart, catalog, &id)?),
        Input::Cart => Output::Cart(commands::get_cart(cart, catalog)?),
        Input::Clear => Output::Cart(commands::clear_cart(cart, catalog)?),
        Input::Help => Output::Help,
        Input::Quit => Output::Quit,
    };

    Ok(output)
}

/// Renders an output as display lines.
pub fn render(session: &Session, output: &Output) -> Vec<String> {
    let money = |cents: i64| session.config.format_currency(cents);

    match output {
        Output::Products(products) if products.is_empty() => vec!["No products found".into()],
        Output::Products(products) => products
            .iter()
            .map(|p| {
                let mut card = format!(
                    "{:>4}  {:<24} {:<10} {:>12}",
                    p.id,
                    p.name,
                    p.condition,
                    money(p.price_cents)
                );
                if p.in_cart > 0 {
                    card.push_str(&format!("  ({} in cart)", p.in_cart));
                }
                card
            })
            .collect(),
        Output::Quantity {
            product_id,
            quantity,
        } => vec![format!("{} in cart: {}", product_id, quantity)],
        Output::Cart(response) => {
            let mut lines: Vec<String> = response
                .items
                .iter()
                .map(|item| match (&item.name, item.subtotal_cents) {
                    (Some(name), Some(subtotal)) => format!(
                        "{:>4}  {:<24} {:<10} x{:<4} {:>12}",
                        item.product_id,
                        name,
                        item.condition.as_deref().unwrap_or(""),
                        item.quantity,
                        money(subtotal)
                    ),
                    _ => format!(
                        "{:>4}  {:<24} {:<10} x{:<4} {:>12}",
                        item.product_id, "(unknown product)", "", item.quantity, "-"
                    ),
                })
                .collect();

            if lines.is_empty() {
                lines.push("Cart is empty".into());
            }

            let totals = &response.totals;
            lines.push(format!(
                "Items: {}  Total: {}",
                totals.total_quantity,
                money(totals.total_price_cents)
            ));
            if totals.unresolved_count > 0 {
                lines.push(format!(
                    "{} line(s) not in the catalog are excluded from the total",
                    totals.unresolved_count
                ));
            }
            lines
        }
        Output::Help => vec![
            "products | search <term> [in:<condition>] | qty <id> | add <id> | dec <id>".into(),
            "rm <id> | cart | clear | help | quit".into(),
        ],
        Output::Quit => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lkh_session::{ErrorCode, StoreConfig};

    fn run(session: &Session, line: &str) -> Output {
        let input = parse_line(line).unwrap().unwrap();
        execute(session, input).unwrap()
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("ADD 3").unwrap(), Some(Input::Add("3".into())));
        assert_eq!(
            parse_line("search iphone pro in:New").unwrap(),
            Some(Input::Search {
                term: "iphone pro".into(),
                condition: "New".into()
            })
        );
        assert_eq!(parse_line("qty 7").unwrap(), Some(Input::Quantity("7".into())));
        assert!(parse_line("dec").is_err());
        assert!(parse_line("checkout").is_err());
    }

    #[test]
    fn test_cart_flow() {
        let session = Session::new(StoreConfig::default());
        run(&session, "add 3");
        run(&session, "add 3");
        let output = run(&session, "dec 3");

        let Output::Cart(response) = output else {
            panic!("expected cart output");
        };
        assert_eq!(response.totals.total_quantity, 1);

        let lines = render(&session, &Output::Cart(response));
        assert_eq!(lines.last().unwrap(), "Items: 1  Total: $300.00");
    }

    #[test]
    fn test_product_cards_show_cart_count() {
        let session = Session::new(StoreConfig::default());
        run(&session, "add 16");
        run(&session, "add 16");

        let lines = render(&session, &run(&session, "search hoodie"));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("(2 in cart)"));

        let lines = render(&session, &run(&session, "qty 16"));
        assert_eq!(lines, vec!["16 in cart: 2"]);

        run(&session, "rm 16");
        let lines = render(&session, &run(&session, "search hoodie"));
        assert!(!lines[0].contains("in cart"));
    }

    #[test]
    fn test_render_empty_cart() {
        let session = Session::new(StoreConfig::default());
        let lines = render(&session, &run(&session, "cart"));
        assert_eq!(lines, vec!["Cart is empty", "Items: 0  Total: $0.00"]);
    }

    #[test]
    fn test_unknown_id_is_flagged() {
        let session = Session::new(StoreConfig::default());
        let lines = render(&session, &run(&session, "add sku-404"));
        assert!(lines[0].contains("(unknown product)"));
        assert_eq!(
            lines[2],
            "1 line(s) not in the catalog are excluded from the total"
        );
    }

    #[test]
    fn test_bad_condition_is_an_api_error() {
        let session = Session::new(StoreConfig::default());
        let input = parse_line("search watch in:Mint").unwrap().unwrap();
        let err = execute(&session, input).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
