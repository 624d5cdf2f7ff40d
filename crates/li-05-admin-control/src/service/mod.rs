//! # Administrative Service

#[cfg(test)]
mod tests;

use crate::domain::{AdminError, AnalyticsReportTicket};
use li_01_indexer_registry::IndexerRegistryApi;
use li_04_query_metering::QueryMeter;
use shared_types::{Amount, CallContext, Identity};
use tracing::{info, warn};

/// The Administrative Controller.
#[derive(Debug)]
pub struct AdminController {
    owner: Identity,
    paused: bool,
    reports: Vec<AnalyticsReportTicket>,
}

impl AdminController {
    pub fn new(owner: Identity) -> Self {
        Self {
            owner,
            paused: false,
            reports: Vec::new(),
        }
    }

    pub fn owner(&self) -> Identity {
        self.owner
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Fails `ServicePaused` while paused.
    pub fn ensure_not_paused(&self) -> Result<(), AdminError> {
        if self.paused {
            return Err(AdminError::ServicePaused);
        }
        Ok(())
    }

    /// Report tickets in request order.
    pub fn reports(&self) -> &[AnalyticsReportTicket] {
        &self.reports
    }

    fn authorize(&self, ctx: &CallContext) -> Result<(), AdminError> {
        if ctx.caller != self.owner {
            warn!(caller = %ctx.caller, "unauthorized admin call");
            return Err(AdminError::NotAuthorized { caller: ctx.caller });
        }
        Ok(())
    }

    pub fn update_fees(
        &self,
        ctx: CallContext,
        meter: &mut QueryMeter,
        basic_fee: Amount,
        premium_fee: Amount,
    ) -> Result<(), AdminError> {
        self.authorize(&ctx)?;
        meter.set_fees(basic_fee, premium_fee);
        Ok(())
    }

    /// Returns the indexer's new activity flag.
    pub fn toggle_indexer(
        &self,
        ctx: CallContext,
        registry: &mut impl IndexerRegistryApi,
        indexer: &Identity,
    ) -> Result<bool, AdminError> {
        self.authorize(&ctx)?;
        Ok(registry.toggle_active(indexer)?)
    }

    /// Returns the fees still held after the withdrawal.
    pub fn withdraw_fees(
        &self,
        ctx: CallContext,
        meter: &mut QueryMeter,
        amount: Amount,
        recipient: &Identity,
    ) -> Result<Amount, AdminError> {
        self.authorize(&ctx)?;
        Ok(meter.withdraw_fees(amount, recipient)?)
    }

    pub fn set_paused(&mut self, ctx: CallContext, paused: bool) -> Result<(), AdminError> {
        self.authorize(&ctx)?;
        self.paused = paused;
        info!(paused, "service pause flag set");
        Ok(())
    }

    pub fn trigger_analytics_report(
        &mut self,
        ctx: CallContext,
    ) -> Result<AnalyticsReportTicket, AdminError> {
        self.authorize(&ctx)?;
        let ticket = AnalyticsReportTicket::new(ctx.caller, ctx.now);
        info!(report_id = %ticket.report_id, "analytics report requested");
        self.reports.push(ticket.clone());
        Ok(ticket)
    }
}
