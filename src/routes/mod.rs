pub mod fleet_routes;
