//! Database service for invoicing-service.

use crate::models::{
    BusinessProfile, CatalogItem, CreateCatalogItem, CreateInvoice, Invoice, InvoiceStatus,
    InvoiceSummary, LineItem, StatusFilter, UpdateCatalogItem, UpsertBusinessProfile,
};
use crate::services::metrics::{DB_QUERY_DURATION, INVOICES_TOTAL, INVOICE_AMOUNT_TOTAL};
use crate::services::{numbering, totals};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Bounded retries when an allocated document number collides with an
/// existing row. Each retry advances the counter, so a stale counter walks
/// forward past the collision instead of looping on it.
const MAX_NUMBER_RETRIES: u32 = 3;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "invoicing-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Invoice Operations
    // -------------------------------------------------------------------------

    /// Create an invoice: compute totals, allocate the next document number,
    /// and insert the invoice row plus its line items in one transaction.
    /// Nothing is committed unless every step succeeds, and a rolled-back
    /// attempt does not burn a sequence value.
    #[instrument(skip(self, input), fields(owner_id = %input.owner_id))]
    pub async fn create_invoice(&self, input: &CreateInvoice) -> Result<Invoice, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_invoice"])
            .start_timer();

        let computed = totals::calculate(&input.items);

        for attempt in 1..=MAX_NUMBER_RETRIES {
            let mut tx = self.pool.begin().await.map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
            })?;

            let document_number = self.allocate_document_number(&mut tx, input.owner_id).await?;
            let invoice_id = Uuid::new_v4();

            let result = sqlx::query_as::<_, Invoice>(
                r#"
                INSERT INTO invoices (
                    invoice_id, owner_id, document_number,
                    currency_code, currency_symbol, currency_name,
                    issue_date, due_date,
                    client_name, client_email, client_phone, client_address,
                    subtotal, discount_total, tax_total, grand_total,
                    notes, terms, status
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
                RETURNING invoice_id, owner_id, document_number,
                          currency_code, currency_symbol, currency_name,
                          issue_date, due_date,
                          client_name, client_email, client_phone, client_address,
                          subtotal, discount_total, tax_total, grand_total,
                          notes, terms, status, paid_at, created_utc
                "#,
            )
            .bind(invoice_id)
            .bind(input.owner_id)
            .bind(&document_number)
            .bind(&input.currency.code)
            .bind(&input.currency.symbol)
            .bind(&input.currency.name)
            .bind(input.issue_date)
            .bind(input.due_date)
            .bind(&input.client.name)
            .bind(&input.client.email)
            .bind(&input.client.phone)
            .bind(&input.client.address)
            .bind(computed.subtotal)
            .bind(computed.discount_total)
            .bind(computed.tax_total)
            .bind(computed.grand_total)
            .bind(&input.notes)
            .bind(&input.terms)
            .bind(InvoiceStatus::Pending.as_str())
            .fetch_one(&mut *tx)
            .await;

            let mut invoice = match result {
                Ok(invoice) => invoice,
                Err(sqlx::Error::Database(ref db_err)) if db_err.is_unique_violation() => {
                    tx.rollback().await.ok();
                    warn!(
                        document_number = %document_number,
                        attempt,
                        "Document number already taken, retrying allocation"
                    );
                    continue;
                }
                Err(e) => {
                    return Err(AppError::DatabaseError(anyhow::anyhow!(
                        "Failed to insert invoice: {}",
                        e
                    )));
                }
            };

            for (sort_order, (item, line)) in
                input.items.iter().zip(computed.lines.iter()).enumerate()
            {
                let inserted = sqlx::query_as::<_, LineItem>(
                    r#"
                    INSERT INTO line_items (
                        line_item_id, invoice_id, name, qty, rate,
                        tax_percent, discount, line_total, sort_order
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                    RETURNING line_item_id, invoice_id, name, qty, rate,
                              tax_percent, discount, line_total, sort_order, created_utc
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(invoice_id)
                .bind(&item.name)
                .bind(item.qty)
                .bind(item.rate)
                .bind(item.tax_percent)
                .bind(item.discount)
                .bind(line.line_total)
                .bind(sort_order as i32)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!("Failed to insert line item: {}", e))
                })?;

                invoice.items.push(inserted);
            }

            tx.commit().await.map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to commit transaction: {}", e))
            })?;

            timer.observe_duration();
            INVOICES_TOTAL.with_label_values(&["created"]).inc();
            if let Some(amount) = invoice.grand_total.to_f64() {
                INVOICE_AMOUNT_TOTAL
                    .with_label_values(&[&invoice.currency.code])
                    .inc_by(amount);
            }

            info!(
                invoice_id = %invoice.invoice_id,
                document_number = %invoice.document_number,
                grand_total = %invoice.grand_total,
                "Invoice created"
            );

            return Ok(invoice);
        }

        Err(AppError::Conflict(anyhow::anyhow!(
            "Could not allocate a unique document number after {} attempts",
            MAX_NUMBER_RETRIES
        )))
    }

    /// Atomic fetch-and-increment on the owner's counter row, inside the
    /// caller's transaction. The first allocation for an owner seeds the
    /// counter from the highest parseable document number already stored.
    async fn allocate_document_number(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner_id: Uuid,
    ) -> Result<String, AppError> {
        let seq: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE counters SET seq = seq + 1
            WHERE owner_id = $1 AND kind = 'invoice'
            RETURNING seq
            "#,
        )
        .bind(owner_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to advance counter: {}", e))
        })?;

        let seq = match seq {
            Some(seq) => seq,
            None => {
                let latest: Option<String> = sqlx::query_scalar(
                    r#"
                    SELECT document_number FROM invoices
                    WHERE owner_id = $1
                    ORDER BY created_utc DESC
                    LIMIT 1
                    "#,
                )
                .bind(owner_id)
                .fetch_optional(&mut **tx)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!("Failed to read latest number: {}", e))
                })?;

                let seed = latest
                    .as_deref()
                    .and_then(numbering::parse_sequence)
                    .unwrap_or(0);

                // Two first allocations can race here; ON CONFLICT turns the
                // loser into a plain increment on the winner's row.
                sqlx::query_scalar(
                    r#"
                    INSERT INTO counters (owner_id, kind, seq)
                    VALUES ($1, 'invoice', $2)
                    ON CONFLICT (owner_id, kind)
                    DO UPDATE SET seq = counters.seq + 1
                    RETURNING seq
                    "#,
                )
                .bind(owner_id)
                .bind(seed + 1)
                .fetch_one(&mut **tx)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!("Failed to seed counter: {}", e))
                })?
            }
        };

        Ok(numbering::format_document_number(seq))
    }

    /// Fetch one invoice with its line items. Absence and another owner's
    /// invoice are indistinguishable.
    #[instrument(skip(self), fields(owner_id = %owner_id, invoice_id = %invoice_id))]
    pub async fn get_invoice(&self, owner_id: Uuid, invoice_id: Uuid) -> Result<Invoice, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_invoice"])
            .start_timer();

        let invoice: Option<Invoice> = sqlx::query_as(
            r#"
            SELECT invoice_id, owner_id, document_number,
                   currency_code, currency_symbol, currency_name,
                   issue_date, due_date,
                   client_name, client_email, client_phone, client_address,
                   subtotal, discount_total, tax_total, grand_total,
                   notes, terms, status, paid_at, created_utc
            FROM invoices
            WHERE invoice_id = $1 AND owner_id = $2
            "#,
        )
        .bind(invoice_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to fetch invoice: {}", e)))?;

        let mut invoice =
            invoice.ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))?;

        self.attach_line_items(std::slice::from_mut(&mut invoice))
            .await?;

        timer.observe_duration();
        Ok(invoice)
    }

    /// List an owner's invoices, newest first. The summary aggregate spans
    /// all of the owner's invoices regardless of the status filter, so the
    /// dashboard totals stay stable while the list narrows.
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn list_invoices(
        &self,
        owner_id: Uuid,
        filter: StatusFilter,
    ) -> Result<(Vec<Invoice>, InvoiceSummary), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_invoices"])
            .start_timer();

        let base = r#"
            SELECT invoice_id, owner_id, document_number,
                   currency_code, currency_symbol, currency_name,
                   issue_date, due_date,
                   client_name, client_email, client_phone, client_address,
                   subtotal, discount_total, tax_total, grand_total,
                   notes, terms, status, paid_at, created_utc
            FROM invoices
            WHERE owner_id = $1
        "#;

        let query = match filter {
            StatusFilter::All => format!("{} ORDER BY created_utc DESC", base),
            StatusFilter::Paid => {
                format!("{} AND status = 'paid' ORDER BY created_utc DESC", base)
            }
            StatusFilter::Pending => {
                format!("{} AND status = 'pending' ORDER BY created_utc DESC", base)
            }
        };

        let mut invoices: Vec<Invoice> = sqlx::query_as(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to list invoices: {}", e))
            })?;

        self.attach_line_items(&mut invoices).await?;

        let (total_invoices, total_received, total_pending): (i64, Decimal, Decimal) =
            sqlx::query_as(
                r#"
                SELECT COUNT(*),
                       COALESCE(SUM(grand_total) FILTER (WHERE status = 'paid'), 0),
                       COALESCE(SUM(grand_total) FILTER (WHERE status <> 'paid'), 0)
                FROM invoices
                WHERE owner_id = $1
                "#,
            )
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to summarize invoices: {}", e))
            })?;

        let summary = InvoiceSummary {
            total_invoices: total_invoices as usize,
            total_received,
            total_pending,
        };

        timer.observe_duration();
        Ok((invoices, summary))
    }

    /// Set the payment status. Marking paid stamps `paid_at` with the
    /// current time (repeat transitions restamp); marking pending clears it.
    #[instrument(skip(self), fields(owner_id = %owner_id, invoice_id = %invoice_id, status = %status.as_str()))]
    pub async fn set_invoice_status(
        &self,
        owner_id: Uuid,
        invoice_id: Uuid,
        status: InvoiceStatus,
    ) -> Result<Invoice, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["set_invoice_status"])
            .start_timer();

        let invoice: Option<Invoice> = sqlx::query_as(
            r#"
            UPDATE invoices
            SET status = $3,
                paid_at = CASE WHEN $3 = 'paid' THEN NOW() ELSE NULL END
            WHERE invoice_id = $1 AND owner_id = $2
            RETURNING invoice_id, owner_id, document_number,
                      currency_code, currency_symbol, currency_name,
                      issue_date, due_date,
                      client_name, client_email, client_phone, client_address,
                      subtotal, discount_total, tax_total, grand_total,
                      notes, terms, status, paid_at, created_utc
            "#,
        )
        .bind(invoice_id)
        .bind(owner_id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to update status: {}", e)))?;

        let mut invoice =
            invoice.ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))?;

        self.attach_line_items(std::slice::from_mut(&mut invoice))
            .await?;

        timer.observe_duration();
        INVOICES_TOTAL.with_label_values(&[status.as_str()]).inc();

        info!(
            invoice_id = %invoice.invoice_id,
            status = %invoice.status.as_str(),
            "Invoice status updated"
        );

        Ok(invoice)
    }

    /// Load the line items for a batch of invoices in one query.
    async fn attach_line_items(&self, invoices: &mut [Invoice]) -> Result<(), AppError> {
        if invoices.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = invoices.iter().map(|i| i.invoice_id).collect();

        let rows: Vec<LineItem> = sqlx::query_as(
            r#"
            SELECT line_item_id, invoice_id, name, qty, rate,
                   tax_percent, discount, line_total, sort_order, created_utc
            FROM line_items
            WHERE invoice_id = ANY($1)
            ORDER BY invoice_id, sort_order
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to fetch line items: {}", e))
        })?;

        let mut by_invoice: HashMap<Uuid, Vec<LineItem>> = HashMap::new();
        for row in rows {
            by_invoice.entry(row.invoice_id).or_default().push(row);
        }

        for invoice in invoices.iter_mut() {
            invoice.items = by_invoice.remove(&invoice.invoice_id).unwrap_or_default();
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Business Profile Operations
    // -------------------------------------------------------------------------

    /// Fetch an owner's business profile, if one exists.
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn get_business_profile(
        &self,
        owner_id: Uuid,
    ) -> Result<Option<BusinessProfile>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_business_profile"])
            .start_timer();

        let profile = sqlx::query_as::<_, BusinessProfile>(
            r#"
            SELECT profile_id, owner_id, company_name, logo_url, phone, email,
                   address, gstin, default_terms, created_utc, updated_utc
            FROM business_profiles
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to fetch profile: {}", e)))?;

        timer.observe_duration();
        Ok(profile)
    }

    /// Create or replace the owner's business profile.
    #[instrument(skip(self, input), fields(owner_id = %owner_id))]
    pub async fn upsert_business_profile(
        &self,
        owner_id: Uuid,
        input: &UpsertBusinessProfile,
    ) -> Result<BusinessProfile, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["upsert_business_profile"])
            .start_timer();

        let profile = sqlx::query_as::<_, BusinessProfile>(
            r#"
            INSERT INTO business_profiles (
                profile_id, owner_id, company_name, logo_url, phone, email,
                address, gstin, default_terms
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (owner_id) DO UPDATE SET
                company_name = EXCLUDED.company_name,
                logo_url = COALESCE(EXCLUDED.logo_url, business_profiles.logo_url),
                phone = EXCLUDED.phone,
                email = EXCLUDED.email,
                address = EXCLUDED.address,
                gstin = EXCLUDED.gstin,
                default_terms = EXCLUDED.default_terms,
                updated_utc = NOW()
            RETURNING profile_id, owner_id, company_name, logo_url, phone, email,
                      address, gstin, default_terms, created_utc, updated_utc
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&input.company_name)
        .bind(&input.logo_url)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.address)
        .bind(&input.gstin)
        .bind(&input.default_terms)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to upsert profile: {}", e)))?;

        timer.observe_duration();

        info!(owner_id = %owner_id, company_name = %profile.company_name, "Business profile saved");

        Ok(profile)
    }

    /// Whether the owner has a business profile.
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn business_profile_exists(&self, owner_id: Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM business_profiles WHERE owner_id = $1)",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to check profile: {}", e)))?;

        Ok(exists)
    }

    // -------------------------------------------------------------------------
    // Catalog Item Operations
    // -------------------------------------------------------------------------

    /// Create a catalog item.
    #[instrument(skip(self, input), fields(owner_id = %input.owner_id))]
    pub async fn create_catalog_item(
        &self,
        input: &CreateCatalogItem,
    ) -> Result<CatalogItem, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_catalog_item"])
            .start_timer();

        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            INSERT INTO catalog_items (item_id, owner_id, name, unit, rate, tax_percent)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING item_id, owner_id, name, unit, rate, tax_percent, created_utc, updated_utc
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.owner_id)
        .bind(&input.name)
        .bind(&input.unit)
        .bind(input.rate)
        .bind(input.tax_percent)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to create catalog item: {}", e))
        })?;

        timer.observe_duration();

        info!(item_id = %item.item_id, name = %item.name, "Catalog item created");

        Ok(item)
    }

    /// List an owner's catalog items, newest first.
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn list_catalog_items(&self, owner_id: Uuid) -> Result<Vec<CatalogItem>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_catalog_items"])
            .start_timer();

        let items = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT item_id, owner_id, name, unit, rate, tax_percent, created_utc, updated_utc
            FROM catalog_items
            WHERE owner_id = $1
            ORDER BY created_utc DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list catalog items: {}", e))
        })?;

        timer.observe_duration();
        Ok(items)
    }

    /// Fetch one catalog item.
    #[instrument(skip(self), fields(owner_id = %owner_id, item_id = %item_id))]
    pub async fn get_catalog_item(
        &self,
        owner_id: Uuid,
        item_id: Uuid,
    ) -> Result<CatalogItem, AppError> {
        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT item_id, owner_id, name, unit, rate, tax_percent, created_utc, updated_utc
            FROM catalog_items
            WHERE item_id = $1 AND owner_id = $2
            "#,
        )
        .bind(item_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to fetch catalog item: {}", e))
        })?;

        item.ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Item not found")))
    }

    /// Update a catalog item; unset fields keep their stored value.
    #[instrument(skip(self, input), fields(owner_id = %owner_id, item_id = %item_id))]
    pub async fn update_catalog_item(
        &self,
        owner_id: Uuid,
        item_id: Uuid,
        input: &UpdateCatalogItem,
    ) -> Result<CatalogItem, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_catalog_item"])
            .start_timer();

        let item: Option<CatalogItem> = sqlx::query_as(
            r#"
            UPDATE catalog_items
            SET name = COALESCE($3, name),
                unit = COALESCE($4, unit),
                rate = COALESCE($5, rate),
                tax_percent = COALESCE($6, tax_percent),
                updated_utc = NOW()
            WHERE item_id = $1 AND owner_id = $2
            RETURNING item_id, owner_id, name, unit, rate, tax_percent, created_utc, updated_utc
            "#,
        )
        .bind(item_id)
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.unit)
        .bind(input.rate)
        .bind(input.tax_percent)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to update catalog item: {}", e))
        })?;

        timer.observe_duration();

        item.ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Item not found")))
    }

    /// Delete a catalog item.
    #[instrument(skip(self), fields(owner_id = %owner_id, item_id = %item_id))]
    pub async fn delete_catalog_item(&self, owner_id: Uuid, item_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM catalog_items WHERE item_id = $1 AND owner_id = $2")
            .bind(item_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete catalog item: {}", e))
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(anyhow::anyhow!("Item not found")));
        }

        info!(item_id = %item_id, "Catalog item deleted");
        Ok(())
    }
}
