//! Sample log used across the parser, pipeline and façade tests.
//!
//! Six records: an Xdebug notice, a `debug_print_backtrace` dump, an
//! exception trace, a warning with an Xdebug stack, a fatal error with its
//! trace, and a trailing Xdebug notice.

pub(crate) const SITE_ROOT: &str = "/var/www/testing-site/";

pub(crate) const DEBUG_LOG: &str = r#"[09-Jun-2024 12:09:02 UTC] Xdebug: [Step Debug] Could not connect to debugging client. Tried: ::1:9003 (from HTTP_X_FORWARDED_FOR HTTP header), localhost:9003 (fallback through xdebug.client_host/xdebug.client_port) :-(
[09-Jun-2024 12:09:03 UTC] Debug BackTrace:
/var/www/testing-site/wp-content/plugins/sample-plugin/includes/RestApi/RestApi.php:300 - get()
/var/www/testing-site/wp-includes/class-wp-hook.php:324 - resolve_route()
/var/www/testing-site/wp-includes/plugin.php:205 - apply_filters()
/var/www/testing-site/wp-includes/rest-api/class-wp-rest-server.php:1224 - apply_filters()
/var/www/testing-site/wp-includes/rest-api/class-wp-rest-server.php:1063 - respond_to_request()
/var/www/testing-site/wp-includes/rest-api/class-wp-rest-server.php:439 - dispatch()
/var/www/testing-site/wp-includes/rest-api.php:428 - serve_request()
/var/www/testing-site/wp-includes/class-wp-hook.php:324 - rest_api_loaded()
/var/www/testing-site/wp-includes/class-wp-hook.php:348 - apply_filters()
/var/www/testing-site/wp-includes/plugin.php:565 - do_action()
/var/www/testing-site/wp-includes/class-wp.php:418 - do_action_ref_array()
/var/www/testing-site/wp-includes/class-wp.php:813 - parse_request()
/var/www/testing-site/wp-includes/functions.php:1336 - main()
/var/www/testing-site/wp-blog-header.php:16 - wp()
/var/www/testing-site/index.php:17 - require()
[09-Jun-2024 12:09:03 UTC] Exception Stack Trace:
#0 /var/www/testing-site/wp-content/plugins/sample-plugin/includes/RestApi/RestApi.php(300): SamplePlugin\Plugin\RestApi\Controllers\SampleController->get(Object(WP_REST_Request))
#1 /var/www/testing-site/wp-includes/class-wp-hook.php(324): SamplePlugin\Plugin\RestApi\RestApi->resolve_route(NULL, Object(WP_REST_Request), Array, Array)
#2 /var/www/testing-site/wp-includes/plugin.php(205): WP_Hook->apply_filters(NULL, Array)
#3 /var/www/testing-site/wp-includes/rest-api/class-wp-rest-server.php(1224): apply_filters('rest_dispatch_r...', NULL, Object(WP_REST_Request), '/xptox/v1/dashb...', Array)
#4 /var/www/testing-site/wp-includes/rest-api/class-wp-rest-server.php(1063): WP_REST_Server->respond_to_request(Object(WP_REST_Request), '/xptox/v1/dashb...', Array, NULL)
#5 /var/www/testing-site/wp-includes/rest-api/class-wp-rest-server.php(439): WP_REST_Server->dispatch(Object(WP_REST_Request))
#6 /var/www/testing-site/wp-includes/rest-api.php(428): WP_REST_Server->serve_request('/xptox/v1/dashb...')
#7 /var/www/testing-site/wp-includes/class-wp-hook.php(324): rest_api_loaded(Object(WP))
#8 /var/www/testing-site/wp-includes/class-wp-hook.php(348): WP_Hook->apply_filters('', Array)
#9 /var/www/testing-site/wp-includes/plugin.php(565): WP_Hook->do_action(Array)
#10 /var/www/testing-site/wp-includes/class-wp.php(418): do_action_ref_array('parse_request', Array)
#11 /var/www/testing-site/wp-includes/class-wp.php(813): WP->parse_request('')
#12 /var/www/testing-site/wp-includes/functions.php(1336): WP->main('')
#13 /var/www/testing-site/wp-blog-header.php(16): wp()
#14 /var/www/testing-site/index.php(17): require('/var/www...')
#15 {main}
[09-Jun-2024 12:09:03 UTC] PHP Warning:  Undefined property: SamplePlugin\Plugin\RestApi\Controllers\SampleController::$repository in /var/www/testing-site/wp-content/plugins/sample-plugin/includes/RestApi/Controllers/SampleController.php on line 87
[09-Jun-2024 12:09:03 UTC] PHP Stack trace:
[09-Jun-2024 12:09:03 UTC] PHP   1. {main}() /var/www/testing-site/index.php:0
[09-Jun-2024 12:09:03 UTC] PHP   2. require() /var/www/testing-site/index.php:17
[09-Jun-2024 12:09:03 UTC] PHP   3. wp($query_vars = *uninitialized*) /var/www/testing-site/wp-blog-header.php:16
[09-Jun-2024 12:09:03 UTC] PHP   4. WP->main($query_args = '') /var/www/testing-site/wp-includes/functions.php:1336
[09-Jun-2024 12:09:03 UTC] PHP   5. WP->parse_request($extra_query_vars = '') /var/www/testing-site/wp-includes/class-wp.php:813
[09-Jun-2024 12:09:03 UTC] PHP   6. do_action_ref_array($hook_name = 'parse_request', $args = [0 => class WP { public $request = 'wp-json/xptox/v1/dashboard'; public $did_permalink = TRUE }]) /var/www/testing-site/wp-includes/class-wp.php:418
[09-Jun-2024 12:09:03 UTC] PHP   7. WP_Hook->do_action($args = [0 => class WP { public $request = 'wp-json/xptox/v1/dashboard'; public $did_permalink = TRUE }]) /var/www/testing-site/wp-includes/plugin.php:565
[09-Jun-2024 12:09:03 UTC] PHP   8. WP_Hook->apply_filters($value = '', $args = [0 => class WP { public $request = 'wp-json/xptox/v1/dashboard'; public $did_permalink = TRUE }]) /var/www/testing-site/wp-includes/class-wp-hook.php:348
[09-Jun-2024 12:09:03 UTC] PHP   9. rest_api_loaded(class WP { public $query_vars = ['rest_route' => '/xptox/v1/dashboard']; public $did_permalink = TRUE }) /var/www/testing-site/wp-includes/class-wp-hook.php:324
[09-Jun-2024 12:09:03 UTC] PHP  10. WP_REST_Server->serve_request($path = '/xptox/v1/dashboard') /var/www/testing-site/wp-includes/rest-api.php:428
[09-Jun-2024 12:09:03 UTC] PHP  11. WP_REST_Server->dispatch($request = class WP_REST_Request { protected $method = 'GET'; protected $route = '/xptox/v1/dashboard' }) /var/www/testing-site/wp-includes/rest-api/class-wp-rest-server.php:439
[09-Jun-2024 12:09:03 UTC] PHP  12. WP_REST_Server->respond_to_request($request = class WP_REST_Request { protected $method = 'GET' }, $route = '/xptox/v1/dashboard', $response = NULL) /var/www/testing-site/wp-includes/rest-api/class-wp-rest-server.php:1063
[09-Jun-2024 12:09:03 UTC] PHP  13. apply_filters($hook_name = 'rest_dispatch_request', $value = NULL, ...$args = variadic(class WP_REST_Request { protected $method = 'GET' }, '/xptox/v1/dashboard')) /var/www/testing-site/wp-includes/rest-api/class-wp-rest-server.php:1224
[09-Jun-2024 12:09:03 UTC] PHP  14. WP_Hook->apply_filters($value = NULL, $args = [0 => NULL, 1 => class WP_REST_Request { protected $method = 'GET' }]) /var/www/testing-site/wp-includes/plugin.php:205
[09-Jun-2024 12:09:03 UTC] PHP  15. SamplePlugin\Plugin\RestApi\RestApi->resolve_route($result = NULL, $request = class WP_REST_Request { protected $method = 'GET' }, $route = '/xptox/v1/dashboard') /var/www/testing-site/wp-includes/class-wp-hook.php:324
[09-Jun-2024 12:09:03 UTC] PHP  16. SamplePlugin\Plugin\RestApi\Controllers\SampleController->get(class WP_REST_Request { protected $method = 'GET' }) /var/www/testing-site/wp-content/plugins/sample-plugin/includes/RestApi/RestApi.php:300
[09-Jun-2024 12:09:03 UTC] PHP Fatal error:  Uncaught Error: Call to a member function get_entries_count() on null in /var/www/testing-site/wp-content/plugins/sample-plugin/includes/RestApi/Controllers/SampleController.php:87
Stack trace:
#0 /var/www/testing-site/wp-content/plugins/sample-plugin/includes/RestApi/RestApi.php(300): SamplePlugin\Plugin\RestApi\Controllers\SampleController->get(Object(WP_REST_Request))
#1 /var/www/testing-site/wp-includes/class-wp-hook.php(324): SamplePlugin\Plugin\RestApi\RestApi->resolve_route(NULL, Object(WP_REST_Request), Array, Array)
#2 /var/www/testing-site/wp-includes/plugin.php(205): WP_Hook->apply_filters(NULL, Array)
#3 /var/www/testing-site/wp-includes/rest-api/class-wp-rest-server.php(1224): apply_filters('rest_dispatch_r...', NULL, Object(WP_REST_Request), '/xptox/v1/dashb...', Array)
#4 /var/www/testing-site/wp-includes/rest-api/class-wp-rest-server.php(1063): WP_REST_Server->respond_to_request(Object(WP_REST_Request), '/xptox/v1/dashb...', Array, NULL)
#5 /var/www/testing-site/wp-includes/rest-api/class-wp-rest-server.php(439): WP_REST_Server->dispatch(Object(WP_REST_Request))
#6 /var/www/testing-site/wp-includes/rest-api.php(428): WP_REST_Server->serve_request('/xptox/v1/dashb...')
#7 /var/www/testing-site/wp-includes/class-wp-hook.php(324): rest_api_loaded(Object(WP))
#8 /var/www/testing-site/wp-includes/class-wp-hook.php(348): WP_Hook->apply_filters('', Array)
#9 /var/www/testing-site/wp-includes/plugin.php(565): WP_Hook->do_action(Array)
#10 /var/www/testing-site/wp-includes/class-wp.php(418): do_action_ref_array('parse_request', Array)
#11 /var/www/testing-site/wp-includes/class-wp.php(813): WP->parse_request('')
#12 /var/www/testing-site/wp-includes/functions.php(1336): WP->main('')
#13 /var/www/testing-site/wp-blog-header.php(16): wp()
#14 /var/www/testing-site/index.php(17): require('/var/www...')
#15 {main}
  thrown in /var/www/testing-site/wp-content/plugins/sample-plugin/includes/RestApi/Controllers/SampleController.php on line 87
[09-Jun-2024 12:09:03 UTC] Xdebug: [Step Debug] Could not connect to debugging client. Tried: ::1:9003 (from HTTP_X_FORWARDED_FOR HTTP header), localhost:9003 (fallback through xdebug.client_host/xdebug.client_port) :-(
"#;

/// The sample as `(line_number, text)` pairs, numbered from 1.
pub(crate) fn numbered_lines() -> Vec<(u64, &'static str)> {
    DEBUG_LOG
        .lines()
        .enumerate()
        .map(|(i, line)| (i as u64 + 1, line))
        .collect()
}
