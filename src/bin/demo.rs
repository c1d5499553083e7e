use curlreq::parse_curl_command;

fn main() {
    let curl_command = "curl 'http://example.com' -H 'Accept: application/json' -H 'Cookie: theme=dark'";
    let result = parse_curl_command(curl_command);
    println!("{:?}", result);
}
