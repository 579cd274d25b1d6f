mod read;
mod write;

#[cfg(test)]
mod tests;

pub use read::ReadTxn;
pub use write::WriteTxn;
