#[cfg(test)]
mod tasks;
#[cfg(test)]
mod utils;
