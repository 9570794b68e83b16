mod conductivity;
mod geometry;
