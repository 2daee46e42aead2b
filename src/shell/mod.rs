//! Line-oriented terminal front-end.
//!
//! Each input line is one user action. Failures are printed as notices and the
//! session carries on; only `quit` or end of input ends it.

mod command;

pub use command::{Command, HELP};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument};

use crate::catalog::CatalogSummary;
use crate::clients::SaleClient;
use crate::domain::format_money;
use crate::error::{ErrorClass, RegistryError, SaleError};
use crate::registry::Registry;
use crate::sale_builder::SaleView;

enum Flow {
    Continue,
    Quit,
}

pub struct Shell<R, W> {
    sale: SaleClient,
    registry: Registry,
    input: R,
    output: W,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(sale: SaleClient, registry: Registry, input: R, output: W) -> Self {
        Self { sale, registry, input, output }
    }

    /// Runs until `quit` or end of input and hands the output back.
    #[instrument(name = "shell", skip(self))]
    pub async fn run(mut self) -> std::io::Result<W> {
        info!("Shell starting");
        self.say("Inventix sales terminal. Type 'help' for commands.").await?;
        let view = self.sale.get_view().await;
        if let Ok(view) = view {
            self.say(&view.to_string()).await?;
        }

        while let Some(line) = self.prompt("> ").await? {
            let flow = match line.parse::<Command>() {
                Ok(command) => self.execute(command).await?,
                Err(message) => {
                    self.notice(ErrorClass::Validation, &message).await?;
                    Flow::Continue
                }
            };
            if let Flow::Quit = flow {
                break;
            }
        }

        info!("Shell stopped");
        self.output.flush().await?;
        Ok(self.output)
    }

    async fn execute(&mut self, command: Command) -> std::io::Result<Flow> {
        debug!(?command, "Executing command");
        match command {
            Command::Empty => {}
            Command::Help => self.say(HELP).await?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Options => self.show_options().await?,
            Command::Invoice(number) => {
                let result = self.sale.set_invoice_number(number).await;
                self.show_sale(result).await?;
            }
            Command::SelectCustomer(id) => {
                let result = self.sale.select_customer(id).await;
                self.show_sale(result).await?;
            }
            Command::SelectProduct(id) => {
                let result = self.sale.select_product(id).await;
                self.show_sale(result).await?;
            }
            Command::Quantity(quantity) => {
                let result = self.sale.set_quantity(quantity).await;
                self.show_sale(result).await?;
            }
            Command::Add(quantity) => {
                let mut result = Ok(());
                if let Some(quantity) = quantity {
                    result = self.sale.set_quantity(quantity).await.map(|_| ());
                }
                let result = match result {
                    Ok(()) => self.sale.add_line_item().await,
                    Err(e) => Err(e),
                };
                self.show_sale(result).await?;
            }
            Command::Remove(line_id) => {
                let result = self.sale.remove_line_item(line_id).await;
                self.show_sale(result).await?;
            }
            Command::Show => {
                let result = self.sale.get_view().await;
                self.show_sale(result).await?;
            }
            Command::Submit => match self.sale.submit().await {
                Ok(receipt) => {
                    self.say(&receipt.message).await?;
                    self.say_catalog(receipt.catalog).await?;
                    self.say(&receipt.view.to_string()).await?;
                }
                Err(e) => self.notice(e.class(), &e.to_string()).await?,
            },
            Command::Clear => {
                let result = self.sale.clear().await;
                self.show_sale(result).await?;
            }
            Command::Reload => self.reload().await?,
            Command::Customers => match self.registry.customers().await {
                Ok(customers) => {
                    for c in customers {
                        let line = format!(
                            "  {:<6} {:<24} {:<12} {:<12} {:<24} {}",
                            c.id,
                            c.name,
                            c.national_id.unwrap_or_default(),
                            c.phone.unwrap_or_default(),
                            c.email.unwrap_or_default(),
                            c.address.unwrap_or_default()
                        );
                        self.say(&line).await?;
                    }
                }
                Err(e) => self.notice(e.class(), &e.to_string()).await?,
            },
            Command::Products => match self.registry.products().await {
                Ok(products) => {
                    for p in products {
                        let line = format!(
                            "  {:<6} {:<24} {:>10} {:>6}  {}",
                            p.id,
                            p.name,
                            format_money(p.price),
                            p.stock,
                            p.supplier.unwrap_or_default()
                        );
                        self.say(&line).await?;
                    }
                }
                Err(e) => self.notice(e.class(), &e.to_string()).await?,
            },
            Command::CustomerAdd(form) => {
                let result = self.registry.register_customer(form).await;
                self.after_registry_change(result).await?;
            }
            Command::CustomerRemove(id) => {
                if self.confirm(&format!("Delete client {}? [y/N] ", id)).await? {
                    let result = self.registry.delete_customer(&id).await;
                    self.after_registry_change(result).await?;
                }
            }
            Command::ProductAdd(form) => {
                let result = self.registry.register_product(form).await;
                self.after_registry_change(result).await?;
            }
            Command::ProductRemove(id) => {
                if self.confirm(&format!("Delete product {}? [y/N] ", id)).await? {
                    let result = self.registry.delete_product(&id).await;
                    self.after_registry_change(result).await?;
                }
            }
            Command::Report { kind, path } => match self.registry.save_report(kind, path.as_deref()).await {
                Ok(path) => self.say(&format!("Report saved to {}", path.display())).await?,
                Err(e) => self.notice(e.class(), &e.to_string()).await?,
            },
        }
        Ok(Flow::Continue)
    }

    async fn show_options(&mut self) -> std::io::Result<()> {
        match self.sale.get_catalog().await {
            Ok(catalog) => {
                self.say("Clients:").await?;
                for option in catalog.customer_options() {
                    self.say(&format!("  {:<6} {}", option.value, option.label)).await?;
                }
                self.say("Products:").await?;
                for option in catalog.product_options() {
                    self.say(&format!("  {:<6} {}", option.value, option.label)).await?;
                }
                Ok(())
            }
            Err(e) => self.notice(e.class(), &e.to_string()).await,
        }
    }

    async fn show_sale(&mut self, result: Result<SaleView, SaleError>) -> std::io::Result<()> {
        match result {
            Ok(view) => self.say(&view.to_string()).await,
            Err(e) => self.notice(e.class(), &e.to_string()).await,
        }
    }

    async fn reload(&mut self) -> std::io::Result<()> {
        match self.sale.reload_catalog().await {
            Ok(summary) => self.say_catalog(summary).await,
            Err(e) => self.notice(e.class(), &e.to_string()).await,
        }
    }

    async fn after_registry_change(&mut self, result: Result<String, RegistryError>) -> std::io::Result<()> {
        match result {
            Ok(message) => {
                self.say(&message).await?;
                self.reload().await
            }
            Err(e) => self.notice(e.class(), &e.to_string()).await,
        }
    }

    async fn say_catalog(&mut self, summary: CatalogSummary) -> std::io::Result<()> {
        let line = format!("Catalog: {} clients, {} products", summary.customers, summary.products);
        self.say(&line).await
    }

    async fn confirm(&mut self, question: &str) -> std::io::Result<bool> {
        let answer = self.prompt(question).await?.unwrap_or_default();
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "s" | "si"))
    }

    async fn prompt(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn notice(&mut self, class: ErrorClass, message: &str) -> std::io::Result<()> {
        let tag = match class {
            ErrorClass::Validation => "!",
            ErrorClass::Rejected => "Error:",
            ErrorClass::Transport => "Request failed:",
        };
        self.say(&format!("{} {}", tag, message)).await
    }

    async fn say(&mut self, text: &str) -> std::io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await
    }
}
