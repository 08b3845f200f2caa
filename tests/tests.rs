mod client;
mod connector;
