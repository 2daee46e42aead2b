use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

use crate::backend::ReportKind;
use crate::domain::{NewCustomer, NewProduct};
use crate::error::SaleError;

pub const HELP: &str = "\
Sale:
  options                      list the clients and products offered for sale
  invoice [number]             set the invoice number
  customer [id]                select the client (no id clears it)
  product [id]                 select the product (no id clears it)
  qty <n>                      set the quantity
  add [n]                      add the selected product (optionally with quantity n)
  remove <line>                remove a line from the sale
  show                         show the pending sale
  submit                       register the sale
  clear                        discard the pending sale
  reload                       reload the catalog
Registry:
  customers | products         list registered clients / products
  customer-add nombre|cedula|celular|email|direccion
  customer-rm <id>
  product-add nombre|descripcion|precio|stock|proveedor
  product-rm <id>
  report <sales-excel|inventory-excel|sales-pdf|inventory-pdf> [path]
Other:
  help                         show this text
  quit                         leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Empty,
    Help,
    Quit,
    Options,
    Invoice(String),
    SelectCustomer(String),
    SelectProduct(String),
    Quantity(i64),
    Add(Option<i64>),
    Remove(u64),
    Show,
    Submit,
    Clear,
    Reload,
    Customers,
    Products,
    CustomerAdd(NewCustomer),
    CustomerRemove(String),
    ProductAdd(NewProduct),
    ProductRemove(String),
    Report { kind: ReportKind, path: Option<PathBuf> },
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "" => Command::Empty,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "options" => Command::Options,
            "invoice" => Command::Invoice(rest.to_string()),
            "customer" => Command::SelectCustomer(rest.to_string()),
            "product" => Command::SelectProduct(rest.to_string()),
            "qty" => Command::Quantity(parse_quantity(rest)?),
            "add" if rest.is_empty() => Command::Add(None),
            "add" => Command::Add(Some(parse_quantity(rest)?)),
            "remove" | "rm" => Command::Remove(
                rest.parse().map_err(|_| format!("remove expects a line number, got '{}'", rest))?,
            ),
            "show" => Command::Show,
            "submit" => Command::Submit,
            "clear" => Command::Clear,
            "reload" => Command::Reload,
            "customers" => Command::Customers,
            "products" => Command::Products,
            "customer-add" => Command::CustomerAdd(parse_customer(rest)?),
            "customer-rm" => Command::CustomerRemove(required(rest, "customer-rm expects an id")?),
            "product-add" => Command::ProductAdd(parse_product(rest)?),
            "product-rm" => Command::ProductRemove(required(rest, "product-rm expects an id")?),
            "report" => {
                let mut parts = rest.split_whitespace();
                let kind = parts.next().unwrap_or_default().parse::<ReportKind>()?;
                Command::Report { kind, path: parts.next().map(PathBuf::from) }
            }
            other => return Err(format!("unknown command '{}', type 'help'", other)),
        };
        Ok(command)
    }
}

/// Quantity input must be an integer; anything else reads as an invalid quantity.
fn parse_quantity(raw: &str) -> Result<i64, String> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| SaleError::InvalidQuantity(raw.trim().to_string()).to_string())
}

fn required(value: &str, message: &str) -> Result<String, String> {
    if value.is_empty() {
        Err(message.to_string())
    } else {
        Ok(value.to_string())
    }
}

fn fields<const N: usize>(raw: &str, usage: &str) -> Result<[String; N], String> {
    let parts: Vec<String> = raw.split('|').map(|p| p.trim().to_string()).collect();
    parts.try_into().map_err(|_| format!("expected {} fields: {}", N, usage))
}

fn parse_customer(raw: &str) -> Result<NewCustomer, String> {
    let [name, national_id, phone, email, address] =
        fields::<5>(raw, "nombre|cedula|celular|email|direccion")?;
    Ok(NewCustomer { name, national_id, phone, email, address })
}

fn parse_product(raw: &str) -> Result<NewProduct, String> {
    let [name, description, price, stock, supplier] =
        fields::<5>(raw, "nombre|descripcion|precio|stock|proveedor")?;
    let price = Decimal::from_str(&price).map_err(|_| format!("invalid precio '{}'", price))?;
    let stock = stock.parse::<i64>().map_err(|_| format!("invalid stock '{}'", stock))?;
    Ok(NewProduct { name, description, price, stock, supplier })
}
