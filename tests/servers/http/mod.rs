mod announce;
mod scrape;
mod shared_registry;
mod status;
