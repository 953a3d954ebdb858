mod token;
mod user;
