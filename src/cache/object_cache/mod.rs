mod moka;
mod redis;
