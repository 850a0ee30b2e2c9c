//! Restaurant CLI Commands
//!
//! - `intake add` - validate, assemble and save a new restaurant
//! - `intake edit <id>` - change fields of a saved restaurant
//! - `intake list` - fetch (with fallback), filter and print
//! - `intake show <id>` / `intake delete <id>`
//! - `intake key` - print the derived restaurant key

use chrono::Utc;
use clap::Parser;
use intake_core::stats::PendingDelete;
use intake_core::{
    EntryFlow, FetchSource, FetchTrigger, IntakeError, ListController, ListState, RestaurantApi,
    RestaurantForm, SortField, SortOrder, SortSpec, SubmissionState, build_update_payload,
    generate_restaurant_key,
};

use crate::Context;
use crate::output::{record_details, record_line};
use crate::prompt::confirm;

/// Restaurant fields. Unset flags leave the form value untouched.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FormArgs {
    /// Restaurant name
    #[arg(long = "name")]
    pub restaurant_name: Option<String>,

    /// Street address
    #[arg(long = "street")]
    pub street_address: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    /// 12345 or 12345-6789
    #[arg(long = "zip")]
    pub zipcode: Option<String>,

    /// Primary phone
    #[arg(long = "phone")]
    pub primary_phone: Option<String>,

    #[arg(long = "website")]
    pub website_url: Option<String>,

    #[arg(long)]
    pub menu_url: Option<String>,

    #[arg(long)]
    pub menu_comments: Option<String>,

    /// General manager name
    #[arg(long)]
    pub gm_name: Option<String>,

    #[arg(long)]
    pub gm_phone: Option<String>,

    #[arg(long)]
    pub secondary_phone: Option<String>,

    #[arg(long)]
    pub third_phone: Option<String>,

    #[arg(long = "doordash")]
    pub doordash_url: Option<String>,

    #[arg(long = "uber-eats")]
    pub uber_eats_url: Option<String>,

    #[arg(long = "grubhub")]
    pub grubhub_url: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

impl FormArgs {
    fn apply_to(self, form: &mut RestaurantForm) {
        let fields = [
            (self.restaurant_name, &mut form.restaurant_name),
            (self.street_address, &mut form.street_address),
            (self.city, &mut form.city),
            (self.state, &mut form.state),
            (self.zipcode, &mut form.zipcode),
            (self.primary_phone, &mut form.primary_phone),
            (self.website_url, &mut form.website_url),
            (self.menu_url, &mut form.menu_url),
            (self.menu_comments, &mut form.menu_comments),
            (self.gm_name, &mut form.gm_name),
            (self.gm_phone, &mut form.gm_phone),
            (self.secondary_phone, &mut form.secondary_phone),
            (self.third_phone, &mut form.third_phone),
            (self.doordash_url, &mut form.doordash_url),
            (self.uber_eats_url, &mut form.uber_eats_url),
            (self.grubhub_url, &mut form.grubhub_url),
            (self.notes, &mut form.notes),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[derive(Debug, Parser)]
pub struct AddArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// Print the payload that would be sent instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Parser)]
pub struct EditArgs {
    /// Restaurant id
    pub id: String,

    #[command(flatten)]
    pub form: FormArgs,
}

#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Sort column: created or name
    #[arg(long, default_value = "created")]
    pub sort: SortField,

    /// asc or desc
    #[arg(long, default_value = "desc")]
    pub order: SortOrder,

    /// Case-insensitive match on name, city, state or manager
    #[arg(long)]
    pub search: Option<String>,

    /// Output as JSON for automation
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct ShowArgs {
    pub id: String,

    /// Output as JSON for automation
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct DeleteArgs {
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Debug, Parser)]
pub struct KeyArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub street: String,

    #[arg(long)]
    pub zip: String,
}

pub async fn run_add(ctx: &Context, args: AddArgs) -> anyhow::Result<()> {
    let mut form = RestaurantForm::default();
    args.form.apply_to(&mut form);

    let mut flow = EntryFlow::with_form(form);
    if let Some(user_id) = ctx.user_id() {
        flow = flow.created_by(user_id);
    }

    if args.dry_run {
        let payload = flow.begin_submit(Utc::now)?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let client = ctx.api_client()?;
    flow.submit(&client, Utc::now).await?;

    if let SubmissionState::SucceededPromptingNext {
        id,
        restaurant_key,
        restaurant_name,
    } = flow.state()
    {
        println!("Saved \"{restaurant_name}\"");
        println!("  id:  {id}");
        println!("  key: {restaurant_key}");
    }
    Ok(())
}

pub async fn run_edit(ctx: &Context, args: EditArgs) -> anyhow::Result<()> {
    let client = ctx.api_client()?;
    let existing = client.get(&args.id).await?;

    let mut form = existing.to_form();
    args.form.apply_to(&mut form);
    form.validate().map_err(IntakeError::from)?;

    let payload = build_update_payload(&existing, &form, Utc::now);
    client.update(&args.id, &payload).await?;
    println!("Updated \"{}\" ({})", payload.restaurant_name, payload.restaurant_key);
    Ok(())
}

pub async fn run_list(ctx: &Context, args: ListArgs) -> anyhow::Result<()> {
    let client = ctx.api_client()?;
    let mut list = ListController::with_sort(SortSpec::new(args.sort, args.order));

    match list.load(&client, FetchTrigger::Mount).await {
        ListState::Failed => {
            let err = list
                .last_error()
                .cloned()
                .unwrap_or_else(|| IntakeError::internal("restaurant fetch failed"));
            return Err(err.into());
        }
        ListState::Loaded(FetchSource::Fallback) => {
            eprintln!("note: sorted fetch failed; showing unsorted results");
        }
        _ => {}
    }

    if let Some(term) = args.search {
        list.set_search(term);
    }
    let visible = list.visible();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    for record in &visible {
        println!("{}", record_line(record));
    }
    println!(
        "\n{} of {} restaurants ({})",
        visible.len(),
        list.records().len(),
        list.sort()
    );
    Ok(())
}

pub async fn run_show(ctx: &Context, args: ShowArgs) -> anyhow::Result<()> {
    let client = ctx.api_client()?;
    let record = client.get(&args.id).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        for line in record_details(&record) {
            println!("{line}");
        }
    }
    Ok(())
}

pub async fn run_delete(ctx: &Context, args: DeleteArgs) -> anyhow::Result<()> {
    let client = ctx.api_client()?;
    // The lookup only names the restaurant in the prompt.
    let name = match client.get(&args.id).await {
        Ok(record) if !record.name().is_empty() => record.name().to_string(),
        Ok(_) => args.id.clone(),
        Err(err) => {
            tracing::warn!(id = %args.id, error = %err, "Lookup before delete failed");
            args.id.clone()
        }
    };
    let pending = PendingDelete { id: args.id, name };

    if !args.yes && !confirm(&pending.prompt())? {
        println!("Cancelled");
        return Ok(());
    }

    client.delete(&pending.id).await?;
    println!("Deleted \"{}\"", pending.name);
    Ok(())
}

pub fn run_key(args: &KeyArgs) -> anyhow::Result<()> {
    println!(
        "{}",
        generate_restaurant_key(&args.name, &args.street, &args.zip)
    );
    Ok(())
}
