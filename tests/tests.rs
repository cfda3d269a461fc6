mod controller;
mod scenario;
