//! Streaming reader for the reference CSV.

use futures::StreamExt;
use tokio::io::AsyncRead;

use crate::domain::valuation::ReferenceRow;

/// Reads every row of a reference CSV with a header line.
///
/// Columns are matched by header name; unknown columns are ignored and
/// empty coordinate or price-per-m² cells become missing values.
pub async fn read_reference_rows<R>(reader: R) -> Result<Vec<ReferenceRow>, csv_async::Error>
where
    R: AsyncRead + Unpin + Send,
{
    let mut deserializer = csv_async::AsyncReaderBuilder::new()
        .has_headers(true)
        .create_deserializer(reader);
    let mut records = deserializer.deserialize::<ReferenceRow>();

    let mut rows = Vec::new();
    while let Some(record) = records.next().await {
        rows.push(record?);
    }
    Ok(rows)
}
