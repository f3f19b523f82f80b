mod extender;
mod protocol;
mod timer;
mod topo_spec;
