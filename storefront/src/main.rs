//! Storefront CLI.
//!
//! Drives the catalog, cart, membership, and simulated checkout against a
//! state directory (default `.storefront/`) that stands in for browser
//! local storage.

use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use storefront::auth::AuthService;
use storefront::cart::CartSession;
use storefront::catalog::{default_catalog, find_product};
use storefront::checkout::{PaymentStatus, SimulatedGateway, place_order};
use storefront::core::checkout::{CaptchaChallenge, CheckoutForm};
use storefront::core::membership::MembershipPlan;
use storefront::core::pricing::Currency;
use storefront::currency::CurrencyService;
use storefront::io::config::load_config;
use storefront::io::rates::HttpRateSource;
use storefront::io::storage::ClientStore;
use storefront::membership::MembershipService;
use storefront::prefs::{Language, Preferences};
use storefront::{blog, logging};

#[derive(Parser)]
#[command(
    name = "storefront",
    version,
    about = "Digital course storefront with a simulated checkout"
)]
struct Cli {
    /// State directory holding persisted client data and config.toml.
    #[arg(long, default_value = ".storefront")]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the course catalog with prices in the selected currency.
    Catalog,
    /// List blog posts, optionally filtered.
    Blog {
        /// Case-insensitive search over title and excerpt.
        #[arg(long)]
        search: Option<String>,
        /// Category filter ("All" passes everything).
        #[arg(long)]
        category: Option<String>,
    },
    #[command(subcommand)]
    Cart(CartCommand),
    #[command(subcommand)]
    Member(MemberCommand),
    /// Validate a checkout form and submit the cart to the simulated
    /// payment gateway.
    Checkout {
        /// TOML file with the billing/payment form fields.
        #[arg(long)]
        form: PathBuf,
    },
    #[command(subcommand)]
    Rates(RatesCommand),
    #[command(subcommand)]
    Lang(LangCommand),
    #[command(subcommand)]
    Auth(AuthCommand),
}

#[derive(Subcommand)]
enum CartCommand {
    /// Add one unit of a product to the cart.
    Add { id: u32 },
    /// Remove a line from the cart.
    Remove { id: u32 },
    /// Set a line's quantity exactly (0 removes the line).
    SetQty { id: u32, quantity: u32 },
    /// Toggle the VIP membership upsell on the order.
    SelectVip {
        #[arg(long)]
        off: bool,
    },
    /// Print the cart with totals.
    Show,
    /// Empty the cart.
    Clear,
}

#[derive(Subcommand)]
enum MemberCommand {
    /// Start the VIP trial.
    Subscribe,
    /// Cancel the subscription (terminal).
    Cancel,
    /// Pause billing (active subscriptions only).
    Pause,
    /// Resume a paused subscription.
    Resume,
    /// Print the subscription record.
    Status,
}

#[derive(Subcommand)]
enum RatesCommand {
    /// Print the cached exchange-rate table.
    Show,
    /// Fetch fresh rates, ignoring the refresh interval.
    Refresh,
}

#[derive(Subcommand)]
enum LangCommand {
    /// Print the selected interface language.
    Show,
    /// Set the interface language by code (en, fr, ...).
    Set { code: String },
}

#[derive(Subcommand)]
enum AuthCommand {
    /// Sign in with the static test credentials.
    Login { email: String, password: String },
    /// Register a throwaway local account.
    Register {
        email: String,
        password: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
    /// Sign out.
    Logout,
    /// Print the signed-in user.
    Whoami,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let store = ClientStore::new(&cli.state_dir);
    let config = load_config(&cli.state_dir.join("config.toml"))?;

    match cli.command {
        Command::Catalog => cmd_catalog(store),
        Command::Blog { search, category } => cmd_blog(search, category),
        Command::Cart(cmd) => cmd_cart(store, cmd),
        Command::Member(cmd) => cmd_member(store, config.membership, cmd),
        Command::Checkout { form } => cmd_checkout(store, config.membership, &form),
        Command::Rates(cmd) => cmd_rates(store, cmd),
        Command::Lang(cmd) => cmd_lang(store, cmd),
        Command::Auth(cmd) => cmd_auth(store, config.test_user, cmd),
    }
}

fn currency_service(store: ClientStore) -> CurrencyService {
    CurrencyService::new(store, Box::new(HttpRateSource::default()))
}

fn cmd_catalog(store: ClientStore) -> Result<()> {
    let currency = currency_service(store);
    for product in default_catalog() {
        println!(
            "{:>2}  {:<55} {:>12}  [{}]",
            product.id,
            product.name,
            currency.format(product.price),
            product.category
        );
    }
    Ok(())
}

fn cmd_blog(search: Option<String>, category: Option<String>) -> Result<()> {
    let posts = blog::default_posts();
    let category = category.unwrap_or_else(|| "All".to_string());
    let hits = blog::search(&posts, search.as_deref().unwrap_or(""));
    for post in hits
        .into_iter()
        .filter(|post| category == "All" || post.category == category)
    {
        println!("{:>2}  {}  ({}, {})", post.id, post.title, post.category, post.date);
    }
    Ok(())
}

fn cmd_cart(store: ClientStore, cmd: CartCommand) -> Result<()> {
    let catalog = default_catalog();
    let mut session = CartSession::load(store);
    match cmd {
        CartCommand::Add { id } => {
            let product =
                find_product(&catalog, id).with_context(|| format!("no product with id {id}"))?;
            session.add_item(product);
        }
        CartCommand::Remove { id } => session.remove_item(id),
        CartCommand::SetQty { id, quantity } => session.update_quantity(id, quantity),
        CartCommand::SelectVip { off } => session.set_vip_membership(!off),
        CartCommand::Clear => session.clear(),
        CartCommand::Show => {}
    }
    print_cart(&session);
    Ok(())
}

fn print_cart(session: &CartSession) {
    let state = session.state();
    for item in &state.items {
        println!(
            "{:>2}  {:<55} x{:<3} {:>10.2} €",
            item.id,
            item.name,
            item.quantity,
            item.original_price.unwrap_or(item.price)
        );
    }
    println!("items:    {}", state.item_count);
    println!("subtotal: {:.2} €", state.subtotal);
    if let Some(pct) = state.membership_discount {
        println!("discount: -{:.2} € ({pct}%)", state.discount_amount);
    }
    println!("total:    {:.2} €", state.total);
    if state.vip_membership_selected {
        println!("vip membership selected");
    }
}

fn cmd_member(
    store: ClientStore,
    config: storefront::io::config::MembershipConfig,
    cmd: MemberCommand,
) -> Result<()> {
    let discount = config.discount_percentage;
    let mut cart = CartSession::load(store.clone());
    let mut service = MembershipService::load(store, config);
    match cmd {
        MemberCommand::Subscribe => {
            let sub = service.subscribe(MembershipPlan::Vip)?;
            println!("subscribed: {} ({})", sub.id, sub.status.as_str());
            // Members get the discount on whatever is in the cart.
            cart.apply_membership_discount(discount);
        }
        MemberCommand::Cancel => {
            service.cancel()?;
            cart.remove_membership_discount();
            println!("subscription cancelled");
        }
        MemberCommand::Pause => {
            service.pause()?;
            println!("subscription paused");
        }
        MemberCommand::Resume => {
            service.resume()?;
            println!("subscription resumed");
        }
        MemberCommand::Status => {}
    }
    match service.subscription() {
        Some(sub) => {
            println!("plan:        {}", sub.plan.as_str());
            println!("status:      {}", sub.status.as_str());
            println!("auto-renew:  {}", sub.auto_renew);
            if let Some(trial_end) = sub.trial_end_date {
                println!("trial ends:  {trial_end}");
            }
            if let Some(billing) = sub.next_billing_date {
                println!("next billed: {billing}");
            }
            if let Some(paused) = sub.paused_at {
                println!("paused at:   {paused}");
            }
        }
        None => println!("no subscription"),
    }
    Ok(())
}

fn cmd_checkout(
    store: ClientStore,
    config: storefront::io::config::MembershipConfig,
    form_path: &PathBuf,
) -> Result<()> {
    let contents = fs::read_to_string(form_path)
        .with_context(|| format!("read form {}", form_path.display()))?;
    let form: CheckoutForm =
        toml::from_str(&contents).with_context(|| format!("parse form {}", form_path.display()))?;

    let cart = CartSession::load(store.clone());
    let monthly_price = config.monthly_price;
    let membership = MembershipService::load(store, config);

    let challenge = CaptchaChallenge::generate(&mut rand::thread_rng());
    print!("security verification: {} ", challenge.question);
    std::io::stdout().flush().context("flush stdout")?;
    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("read captcha answer")?;

    let ticket = place_order(
        &SimulatedGateway,
        cart.state(),
        &form,
        &challenge,
        answer.trim(),
        true,
        membership.status(),
        monthly_price,
    )?;

    println!("order total: {:.2} €", ticket.order().total);
    println!("we're processing your transaction...");
    // The simulated gateway never settles; report the permanent state
    // instead of spinning on it.
    match ticket.poll() {
        PaymentStatus::Processing => {
            println!("status: processing (this demo gateway never completes)");
        }
    }
    Ok(())
}

fn cmd_rates(store: ClientStore, cmd: RatesCommand) -> Result<()> {
    let mut service = currency_service(store);
    if matches!(cmd, RatesCommand::Refresh) {
        service.force_refresh();
    }
    for currency in Currency::ALL {
        println!(
            "{}  {:>8.4}  ({})",
            currency.code(),
            service.rates().rate(currency),
            currency.symbol()
        );
    }
    Ok(())
}

fn cmd_lang(store: ClientStore, cmd: LangCommand) -> Result<()> {
    let prefs = Preferences::new(store);
    match cmd {
        LangCommand::Show => {}
        LangCommand::Set { code } => {
            let Some(language) = Language::from_code(&code) else {
                bail!(
                    "unknown language '{code}' (expected one of: {})",
                    Language::ALL.map(Language::code).join(", ")
                );
            };
            prefs.set_language(language)?;
        }
    }
    let language = prefs.language();
    println!("{} ({})", language.code(), language.name());
    Ok(())
}

fn cmd_auth(
    store: ClientStore,
    test_user: storefront::io::config::TestUserConfig,
    cmd: AuthCommand,
) -> Result<()> {
    let auth = AuthService::new(store, test_user);
    match cmd {
        AuthCommand::Login { email, password } => {
            let user = auth.login(&email, &password)?;
            println!("signed in as {}", user.email);
        }
        AuthCommand::Register {
            email,
            password,
            first_name,
            last_name,
        } => {
            let user = auth.register(&email, &password, &first_name, &last_name)?;
            println!("registered {}", user.email);
        }
        AuthCommand::Logout => {
            auth.logout()?;
            println!("signed out");
        }
        AuthCommand::Whoami => match auth.current_user() {
            Some(user) => println!("{} ({} {})", user.email, user.first_name, user.last_name),
            None => println!("not signed in"),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cart_add() {
        let cli = Cli::parse_from(["storefront", "cart", "add", "3"]);
        assert!(matches!(
            cli.command,
            Command::Cart(CartCommand::Add { id: 3 })
        ));
    }

    #[test]
    fn parse_member_subscribe() {
        let cli = Cli::parse_from(["storefront", "member", "subscribe"]);
        assert!(matches!(cli.command, Command::Member(MemberCommand::Subscribe)));
    }

    #[test]
    fn parse_state_dir_flag() {
        let cli = Cli::parse_from(["storefront", "--state-dir", "/tmp/x", "catalog"]);
        assert_eq!(cli.state_dir, PathBuf::from("/tmp/x"));
    }

    #[test]
    fn parse_lang_set() {
        let cli = Cli::parse_from(["storefront", "lang", "set", "fr"]);
        assert!(matches!(
            cli.command,
            Command::Lang(LangCommand::Set { .. })
        ));
    }
}
