use crate::identity::{fold, IdentitySet};
use crate::mutual::{name, resolve, NameFallback, Ranking};
use crate::result::AppResult;
use crate::scanner::{scan, ScanSummary};
use crate::store::{ConnectionReader, ConnectionWriter};
use log::info;

#[derive(Clone, Debug, PartialEq)]
pub struct RunOptions {
    pub identity: IdentitySet,
    pub name_fallback: NameFallback,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    pub summary: ScanSummary,
    pub ranking: Ranking,
}


/// Scans `lines` into `store`, then ranks the mutual contacts of the identity.
///
/// The store is sealed once the scan is committed, so nothing is written after
/// ranking starts. If the scan fails the store is dropped uncommitted.
pub fn run<I, S, W>(lines: I, mut store: W, options: &RunOptions) -> AppResult<RunOutcome>
where
    I: IntoIterator<Item = AppResult<S>>,
    S: AsRef<str>,
    W: ConnectionWriter + ConnectionReader,
{
    store.begin_scan()?;
    let summary = scan(lines, &store)?;
    store.commit_scan()?;

    let sealed = store.seal();
    let ranking = rank(&sealed, options)?;

    Ok(RunOutcome { summary, ranking })
}


pub fn rank<R>(reader: &R, options: &RunOptions) -> AppResult<Ranking>
where
    R: ConnectionReader + ?Sized,
{
    let identity = &options.identity;
    let addresses = identity.query_addresses();

    let outbound = fold(&reader.outbound(&addresses)?, identity);
    let inbound = fold(&reader.inbound(&addresses)?, identity);

    let contacts = resolve(&outbound, &inbound, identity.display_name());
    let ranking = name(contacts, reader, options.name_fallback)?;

    info!(
        "Ranked {} mutual contacts for {}, {} without a display name",
        ranking.contacts.len(),
        identity.display_name(),
        ranking.unresolved.len()
    );

    Ok(ranking)
}
