//! Shipping label command handlers.
//!
//! `fetch`, `refund`, `print` and `verify-address` talk to the site; `list`
//! and `show` only read the local cache.

use chrono::DateTime;
use clap::{Subcommand, ValueEnum};
use wcsdk_core::{
    AddressType, AddressVerificationResult, ShippingLabel, ShippingLabelAddress, Site,
};
use wcsdk_store::ShippingLabelStore;

use crate::{or_not_available, table_cell};

#[derive(Debug, Subcommand)]
pub enum LabelsCommands {
    /// Fetch an order's labels from the site and cache them
    Fetch {
        #[arg(long)]
        order: i64,
    },
    /// List the cached labels of an order
    List {
        #[arg(long)]
        order: i64,
    },
    /// Show one cached label in detail
    Show {
        #[arg(long)]
        order: i64,
        #[arg(long)]
        label: i64,
    },
    /// Request a refund for a label
    Refund {
        #[arg(long)]
        order: i64,
        #[arg(long)]
        label: i64,
    },
    /// Print a label; writes the base64-encoded PDF to stdout
    Print {
        #[arg(long)]
        label: i64,
        /// Paper size understood by the label service (label, legal, letter, a4)
        #[arg(long, default_value = "label")]
        paper_size: String,
    },
    /// Validate an address with the label service
    VerifyAddress {
        #[arg(long = "type", value_enum, default_value_t = AddressKind::Destination)]
        address_type: AddressKind,
        #[command(flatten)]
        address: AddressArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AddressKind {
    Origin,
    Destination,
}

impl From<AddressKind> for AddressType {
    fn from(kind: AddressKind) -> Self {
        match kind {
            AddressKind::Origin => AddressType::Origin,
            AddressKind::Destination => AddressType::Destination,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct AddressArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long = "address1")]
    pub address: Option<String>,
    #[arg(long = "address2")]
    pub address_2: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub postcode: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
}

impl From<AddressArgs> for ShippingLabelAddress {
    fn from(args: AddressArgs) -> Self {
        Self {
            company: args.company,
            name: args.name,
            phone: args.phone,
            country: args.country,
            state: args.state,
            address: args.address,
            address_2: args.address_2,
            city: args.city,
            postcode: args.postcode,
        }
    }
}

pub(crate) async fn run(
    store: &ShippingLabelStore,
    site: &Site,
    command: LabelsCommands,
) -> anyhow::Result<()> {
    match command {
        LabelsCommands::Fetch { order } => {
            let labels = store.fetch_shipping_labels_for_order(site, order).await?;
            println!("fetched {} label(s) for order {order}", labels.len());
            print_table(&labels);
        }
        LabelsCommands::List { order } => {
            let labels = store.get_shipping_labels_for_order(site, order).await?;
            if labels.is_empty() {
                println!("no labels cached for order {order}; run `labels fetch` first");
                return Ok(());
            }
            print_table(&labels);
        }
        LabelsCommands::Show { order, label } => {
            let found = store
                .get_shipping_label_by_id(site, order, label)
                .await?
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "label {label} of order {order} not found; run `labels fetch` first"
                    )
                })?;
            print_detail(&found);
        }
        LabelsCommands::Refund { order, label } => {
            let accepted = store
                .refund_shipping_label_for_order(site, order, label)
                .await?;
            if accepted {
                println!("refund requested for label {label}");
            } else {
                println!("refund for label {label} was not accepted");
            }
        }
        LabelsCommands::Print { label, paper_size } => {
            let content = store.print_shipping_label(site, &paper_size, label).await?;
            println!("{content}");
        }
        LabelsCommands::VerifyAddress {
            address_type,
            address,
        } => {
            let address = ShippingLabelAddress::from(address);
            let result = store
                .verify_address(site, &address, address_type.into())
                .await?;
            match result {
                AddressVerificationResult::Valid(suggested) => {
                    println!("address is valid; suggested form:");
                    print_address(&suggested);
                }
                AddressVerificationResult::InvalidAddress(reason) => {
                    println!("invalid address: {reason}");
                }
                AddressVerificationResult::InvalidRequest(reason) => {
                    println!("request rejected: {}", or_not_available(non_empty(&reason), "reason"));
                }
            }
        }
    }
    Ok(())
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn fmt_created(millis: Option<i64>) -> Option<String> {
    millis
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
}

fn print_table(labels: &[ShippingLabel]) {
    println!(
        "{:<10}{:<12}{:<18}{:<26}TRACKING",
        "LABEL", "STATUS", "CREATED", "SERVICE"
    );
    for label in labels {
        println!(
            "{:<10}{:<12}{:<18}{:<26}{}",
            label.remote_shipping_label_id,
            table_cell(label.status.as_deref()),
            table_cell(fmt_created(label.date_created)),
            table_cell(label.service_name.as_deref()),
            table_cell(label.tracking_number.as_deref()),
        );
    }
}

fn print_detail(label: &ShippingLabel) {
    println!("Label {} (order {})", label.remote_shipping_label_id, label.order_id);
    println!("  status:      {}", or_not_available(label.status.as_deref(), "status"));
    println!(
        "  created:     {}",
        or_not_available(fmt_created(label.date_created), "creation date")
    );
    println!("  carrier:     {}", or_not_available(label.carrier_id.as_deref(), "carrier"));
    println!("  service:     {}", or_not_available(label.service_name.as_deref(), "service"));
    println!("  package:     {}", or_not_available(label.package_name.as_deref(), "package"));
    println!(
        "  tracking:    {}",
        or_not_available(label.tracking_number.as_deref(), "tracking number")
    );
    let currency = label.currency.as_deref().unwrap_or("");
    println!(
        "  rate:        {}",
        or_not_available(label.rate.map(|r| format!("{r:.2} {currency}")), "rate")
    );
    println!(
        "  refundable:  {}",
        or_not_available(
            label.refundable_amount.map(|r| format!("{r:.2} {currency}")),
            "refundable amount"
        )
    );
    println!("  refunded:    {}", if label.is_refunded() { "yes" } else { "no" });
    println!(
        "  products:    {}",
        or_not_available(label.product_names.as_ref().map(|n| n.join(", ")), "product names")
    );
    match label.origin_address() {
        Some(origin) => {
            println!("  origin:");
            print_address(&origin);
        }
        None => println!("  origin:      origin address not available"),
    }
    match label.destination_address() {
        Some(destination) => {
            println!("  destination:");
            print_address(&destination);
        }
        None => println!("  destination: destination address not available"),
    }
}

fn print_address(address: &ShippingLabelAddress) {
    let lines = [
        address.name.as_deref(),
        address.company.as_deref(),
        address.address.as_deref(),
        address.address_2.as_deref(),
        address.city.as_deref(),
        address.state.as_deref(),
        address.postcode.as_deref(),
        address.country.as_deref(),
        address.phone.as_deref(),
    ];
    let mut printed = false;
    for line in lines.into_iter().flatten().filter(|l| !l.is_empty()) {
        println!("    {line}");
        printed = true;
    }
    if !printed {
        println!("    address not available");
    }
}
