use clap::Args;
use coupons_app::{
    database::Db,
    domain::coupons::{CouponsService, PgCouponsService, data::CouponFilter},
};

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Search criteria, e.g. '{"brandEqual":"Tesco","valueFrom":1}'
    #[arg(long, default_value = "{}")]
    filter: String,
}

pub(crate) async fn run(args: SearchArgs) -> Result<(), String> {
    let filter: CouponFilter = serde_json::from_str(&args.filter)
        .map_err(|error| format!("invalid filter: {error}"))?;

    let pool = args.database.connect().await?;
    let service = PgCouponsService::new(Db::new(pool, args.database.timeout()));

    let coupons = service
        .search(Some(filter))
        .await
        .map_err(|error| format!("search failed: {error}"))?;

    let json = serde_json::to_string_pretty(&coupons)
        .map_err(|error| format!("failed to encode coupons: {error}"))?;

    println!("{json}");

    Ok(())
}
