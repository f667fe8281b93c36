//! Output formatting for price quotes and shipping lookups (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::pricing::PricingResult;
use crate::shipping::{ChannelTable, ShippingChannel, ShippingQuote};

/// Formats solver results for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a solved price quote.
    pub fn format_quote(&self, result: &PricingResult) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => self.table_quote(result),
            OutputFormat::Markdown => self.markdown_quote(result),
            OutputFormat::Csv => self.csv_quote(result),
        }
    }

    /// Formats a shipping channel lookup.
    pub fn format_shipping(&self, quote: &ShippingQuote) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(quote).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => self.table_shipping(quote),
            OutputFormat::Markdown => self.markdown_shipping(quote),
            OutputFormat::Csv => self.csv_shipping(quote),
        }
    }

    /// Formats the channel table.
    pub fn format_channels(&self, table: &ChannelTable) -> String {
        if table.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_channel_header(),
                _ => "No shipping channels configured.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(table).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Table => self.table_channels(table.channels()),
            OutputFormat::Markdown => self.markdown_channels(table.channels()),
            OutputFormat::Csv => self.csv_channels(table.channels()),
        }
    }

    // Table formatting

    fn table_quote(&self, r: &PricingResult) -> String {
        let b = &r.breakdown;
        let mut lines = Vec::new();

        lines.push(format!("Price:       {:.2} ({:.2} dest)", r.target_price, r.target_price_dest));
        lines.push(format!(
            "Commission:  tier {} at {:.1}%",
            r.commission_tier,
            r.commission_rate * 100.0
        ));

        match &r.channel {
            Some(ch) => lines.push(format!(
                "Shipping:    {:.2} via {} ({})",
                r.shipping_fee, ch.channel_name, ch.code
            )),
            None => lines.push(format!("Shipping:    {:.2} (estimate)", r.shipping_fee)),
        }
        if let Some(err) = &r.shipping_error {
            lines.push(format!("Warning:     {}", err));
        }

        lines.push(String::new());
        lines.push(format!("  Purchase    {:>10.2}", b.purchase_cost));
        lines.push(format!("  Shipping    {:>10.2}", b.shipping_fee));
        lines.push(format!("  Label       {:>10.2}", b.label_fee));
        lines.push(format!("  Commission  {:>10.2}", b.commission));
        lines.push(format!("  Misc        {:>10.2}", b.misc_fee));
        lines.push(format!("  {:-<22}", ""));
        lines.push(format!("  Total       {:>10.2}", b.total_cost));
        lines.push(String::new());

        lines.push(format!(
            "Profit:      {:.2} ({:.1}%, target {:.0}%)",
            r.profit,
            r.profit_ratio * 100.0,
            r.target_profit_rate * 100.0
        ));
        lines.push(format!(
            "Iterations:  {} ({:?}{})",
            r.iterations,
            r.convergence,
            if r.shipping_changed { ", shipping changed" } else { "" }
        ));

        lines.join("\n")
    }

    fn table_shipping(&self, q: &ShippingQuote) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Channel:  {} ({})", q.channel.channel_name, q.channel.code));
        lines.push(format!("Fee:      {:.2}", q.fee));
        lines.push(format!("Formula:  {}", q.formula));
        if !q.channel.delivery_days.is_empty() {
            lines.push(format!("Delivery: {}", q.channel.delivery_days));
        }
        lines.push(format!(
            "Parcel:   {}g, longest {:.1}cm, girth {:.1}cm, value {:.2}",
            q.weight_g, q.max_dimension_cm, q.girth_cm, q.price
        ));

        lines.join("\n")
    }

    fn table_channels(&self, channels: &[ShippingChannel]) -> String {
        let name_width = 28;

        let mut lines = Vec::new();
        lines.push(format!(
            "{:<5}  {:<name_width$}  {:>17}  {:>13}  {:>9}  {}",
            "Code", "Channel", "Value", "Weight (g)", "Size (cm)", "Fee"
        ));
        lines.push(format!(
            "{:-<5}  {:-<name_width$}  {:->17}  {:->13}  {:->9}  {:-<16}",
            "", "", "", "", "", ""
        ));

        for ch in channels {
            lines.push(format!(
                "{:<5}  {:<name_width$}  {:>17}  {:>13}  {:>9}  {} + {}/g",
                ch.code,
                ch.channel_name,
                format!("{}-{}", ch.min_value, ch.max_value),
                format!("{}-{}", ch.min_weight_g, ch.max_weight_g),
                format!("{}/{}", ch.max_dimension_cm, ch.max_girth_cm),
                ch.base_fee,
                ch.per_gram_rate
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} channels", channels.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_quote(&self, r: &PricingResult) -> String {
        let b = &r.breakdown;
        let mut lines = Vec::new();

        lines.push(format!("## Target price {:.2}", r.target_price));
        lines.push(String::new());
        lines.push(format!("- **Destination price:** {:.2}", r.target_price_dest));
        lines.push(format!(
            "- **Commission:** tier {} ({:.1}%)",
            r.commission_tier,
            r.commission_rate * 100.0
        ));
        match &r.channel {
            Some(ch) => lines.push(format!(
                "- **Shipping:** {:.2} via {}",
                r.shipping_fee, ch.channel_name
            )),
            None => lines.push(format!("- **Shipping:** {:.2} (estimate)", r.shipping_fee)),
        }
        if let Some(err) = &r.shipping_error {
            lines.push(format!("- **Warning:** {}", err));
        }
        lines.push(format!(
            "- **Profit:** {:.2} ({:.1}%)",
            r.profit,
            r.profit_ratio * 100.0
        ));
        lines.push(String::new());

        lines.push("| Cost | Amount |".to_string());
        lines.push("|------|-------:|".to_string());
        lines.push(format!("| Purchase | {:.2} |", b.purchase_cost));
        lines.push(format!("| Shipping | {:.2} |", b.shipping_fee));
        lines.push(format!("| Label | {:.2} |", b.label_fee));
        lines.push(format!("| Commission | {:.2} |", b.commission));
        lines.push(format!("| Misc | {:.2} |", b.misc_fee));
        lines.push(format!("| **Total** | **{:.2}** |", b.total_cost));

        lines.join("\n")
    }

    fn markdown_shipping(&self, q: &ShippingQuote) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", q.channel.channel_name));
        lines.push(String::new());
        lines.push(format!("- **Code:** {}", q.channel.code));
        lines.push(format!("- **Fee:** {:.2} ({})", q.fee, q.formula));
        if !q.channel.delivery_days.is_empty() {
            lines.push(format!("- **Delivery:** {}", q.channel.delivery_days));
        }

        lines.join("\n")
    }

    fn markdown_channels(&self, channels: &[ShippingChannel]) -> String {
        let mut lines = Vec::new();

        lines.push("| Code | Channel | Value | Weight (g) | Size (cm) | Fee |".to_string());
        lines.push("|------|---------|-------|------------|-----------|-----|".to_string());

        for ch in channels {
            lines.push(format!(
                "| {} | {} | {}-{} | {}-{} | {}/{} | {} + {}/g |",
                ch.code,
                ch.channel_name,
                ch.min_value,
                ch.max_value,
                ch.min_weight_g,
                ch.max_weight_g,
                ch.max_dimension_cm,
                ch.max_girth_cm,
                ch.base_fee,
                ch.per_gram_rate
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} channels*", channels.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_quote(&self, r: &PricingResult) -> String {
        let b = &r.breakdown;
        let channel = r.channel.as_ref().map(|c| Self::csv_escape(&c.code)).unwrap_or_default();
        let warning =
            r.shipping_error.as_ref().map(|e| Self::csv_escape(&e.to_string())).unwrap_or_default();

        [
            "target_price,target_price_dest,commission_tier,commission_rate,shipping_fee,channel,purchase_cost,label_fee,commission,misc_fee,total_cost,profit,profit_ratio,iterations,shipping_changed,warning".to_string(),
            format!(
                "{:.2},{:.2},{},{},{:.2},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.4},{},{},{}",
                r.target_price,
                r.target_price_dest,
                r.commission_tier,
                r.commission_rate,
                r.shipping_fee,
                channel,
                b.purchase_cost,
                b.label_fee,
                b.commission,
                b.misc_fee,
                b.total_cost,
                r.profit,
                r.profit_ratio,
                r.iterations,
                r.shipping_changed,
                warning
            ),
        ]
        .join("\n")
    }

    fn csv_shipping(&self, q: &ShippingQuote) -> String {
        [
            "code,channel,fee,weight_g,max_dimension_cm,girth_cm,price".to_string(),
            format!(
                "{},{},{:.2},{},{},{},{:.2}",
                q.channel.code,
                Self::csv_escape(&q.channel.channel_name),
                q.fee,
                q.weight_g,
                q.max_dimension_cm,
                q.girth_cm,
                q.price
            ),
        ]
        .join("\n")
    }

    fn csv_channel_header(&self) -> String {
        "code,channel,min_value,max_value,min_weight_g,max_weight_g,max_dimension_cm,max_girth_cm,base_fee,per_gram_rate"
            .to_string()
    }

    fn csv_channels(&self, channels: &[ShippingChannel]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_channel_header());

        for ch in channels {
            lines.push(format!(
                "{},{},{},{},{},{},{},{},{},{}",
                ch.code,
                Self::csv_escape(&ch.channel_name),
                ch.min_value,
                ch.max_value,
                ch.min_weight_g,
                ch.max_weight_g,
                ch.max_dimension_cm,
                ch.max_girth_cm,
                ch.base_fee,
                ch.per_gram_rate
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}
