pub mod flow_diagram;
pub mod robot_info;
