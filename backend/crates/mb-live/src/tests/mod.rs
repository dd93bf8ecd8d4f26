mod transition_guard;
